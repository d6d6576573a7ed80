//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area and centralizes clipping logic.
//!
//! Floating windows routinely hang off the edges of the desktop. Writing
//! out-of-bounds into the underlying `Buffer` panics, so every draw path in
//! the shell goes through `UiFrame`, which clips widgets to its area and
//! composites offscreen window buffers with signed destinations.
use crate::window::WindowGeometry;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    ///
    /// Window contents render into an offscreen buffer sized to their
    /// logical area before being composited onto the terminal buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer, state);
        }
    }

    /// Paint every cell of `area` (clipped) with a blank symbol and `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Write `text` at (x, y), truncated at the right edge of the frame.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        safe_set_string(self.buffer, self.area, x, y, text, style);
    }

    /// Copy `src` (anchored at 0,0) onto the frame at a signed destination,
    /// dropping whatever falls outside the frame.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: WindowGeometry) {
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        for sy in 0..dest.height as i32 {
            let dy = dest.y + sy;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in 0..dest.width as i32 {
                let dx = dest.x + sx;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn filled(area: Rect, symbol: &str) -> Buffer {
        let mut buf = Buffer::empty(area);
        for y in 0..area.height {
            for x in 0..area.width {
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_symbol(symbol);
                }
            }
        }
        buf
    }

    #[test]
    fn blit_from_signed_clips_negative_offsets() {
        let frame_area = Rect::new(0, 0, 4, 2);
        let mut dest = Buffer::empty(frame_area);
        let mut frame = UiFrame::from_parts(frame_area, &mut dest);
        let src = filled(Rect::new(0, 0, 3, 2), "#");
        frame.blit_from_signed(&src, WindowGeometry::new(-1, 0, 3, 2));
        let buffer = frame.buffer;
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(buffer.cell((2, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn blit_from_signed_ignores_non_overlapping() {
        let frame_area = Rect::new(0, 0, 3, 3);
        let mut dest = Buffer::empty(frame_area);
        let mut frame = UiFrame::from_parts(frame_area, &mut dest);
        let src = filled(Rect::new(0, 0, 2, 2), "#");
        frame.blit_from_signed(&src, WindowGeometry::new(-5, -5, 2, 2));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(frame.buffer.cell((x, y)).unwrap().symbol(), " ");
            }
        }
    }

    #[test]
    fn fill_is_clipped_to_frame() {
        let frame_area = Rect::new(0, 0, 3, 2);
        let mut dest = Buffer::empty(frame_area);
        let mut frame = UiFrame::from_parts(frame_area, &mut dest);
        // would panic without clipping
        frame.fill(Rect::new(1, 1, 10, 10), Style::default());
        frame.set_string(2, 0, "abc", Style::default());
        assert_eq!(frame.buffer.cell((2, 0)).unwrap().symbol(), "a");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_to_width("héllo", 2), "hé");
        assert_eq!(truncate_to_width("hi", 5), "hi");
    }
}
