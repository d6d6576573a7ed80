//! Window chrome: layout, hit testing and drawing of borders, the title bar
//! and its three traffic-light buttons.
//!
//! Everything here works on the *cell* rectangle of a window (signed, as
//! produced by [`CellGrid::to_cells`](crate::layout::CellGrid::to_cells)).
//! Row 0 and the last row/column are resize borders, row 1 is the title bar,
//! and the content area fills the rest.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{WindowGeometry, WindowState};
use crate::layout::floating::ResizeEdge;
use crate::theme;
use crate::ui::UiFrame;

/// Column offsets of the close / minimize / maximize buttons in the title bar.
const BUTTON_COLUMNS: [i32; 3] = [2, 4, 6];
const BUTTON_GLYPH: &str = "●";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Minimize,
    Maximize,
}

impl HeaderAction {
    const ORDER: [HeaderAction; 3] = [
        HeaderAction::Close,
        HeaderAction::Minimize,
        HeaderAction::Maximize,
    ];
}

/// What a pointer landed on inside a window's cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Resize(ResizeEdge),
    Button(HeaderAction),
    TitleBar,
    /// Content area, in cells relative to the content origin.
    Content { column: u16, row: u16 },
    Outside,
}

/// Cell rectangle of the content area inside the chrome.
pub fn content_rect(rect: WindowGeometry) -> WindowGeometry {
    WindowGeometry {
        x: rect.x + 1,
        y: rect.y + 2,
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(3),
    }
}

pub fn hit_test(rect: WindowGeometry, column: i32, row: i32) -> ChromeHit {
    if rect.width == 0 || rect.height == 0 {
        return ChromeHit::Outside;
    }
    let dx = column - rect.x;
    let dy = row - rect.y;
    let last_col = rect.width as i32 - 1;
    let last_row = rect.height as i32 - 1;
    if dx < 0 || dy < 0 || dx > last_col || dy > last_row {
        return ChromeHit::Outside;
    }

    let left = dx == 0;
    let right = dx == last_col;
    let top = dy == 0;
    let bottom = dy == last_row;
    let edge = match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        _ => None,
    };
    if let Some(edge) = edge {
        return ChromeHit::Resize(edge);
    }

    if dy == 1 {
        for (offset, action) in BUTTON_COLUMNS.iter().zip(HeaderAction::ORDER) {
            if dx == *offset && *offset < last_col {
                return ChromeHit::Button(action);
            }
        }
        return ChromeHit::TitleBar;
    }

    ChromeHit::Content {
        column: (dx - 1) as u16,
        row: (dy - 2) as u16,
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: WindowGeometry,
        title: &str,
        focused: bool,
        state: WindowState,
    );
}

/// Rounded, title-centered chrome with colored buttons on the left.
#[derive(Debug, Default)]
pub struct AquaDecorator;

impl AquaDecorator {
    fn put(frame: &mut UiFrame<'_>, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
        if x < bounds.x as i32
            || y < bounds.y as i32
            || x >= bounds.x as i32 + bounds.width as i32
            || y >= bounds.y as i32 + bounds.height as i32
        {
            return;
        }
        if let Some(cell) = frame.buffer_mut().cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }
}

impl WindowDecorator for AquaDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: WindowGeometry,
        title: &str,
        focused: bool,
        state: WindowState,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let bounds = frame.area();
        let mut border_style = Style::default()
            .fg(theme::border_fg(focused))
            .bg(theme::body_bg());
        let mut header_style = Style::default()
            .fg(theme::header_fg(focused))
            .bg(theme::header_bg(focused));
        if focused {
            header_style = header_style.add_modifier(Modifier::BOLD);
        }
        if state == WindowState::Closing {
            border_style = border_style.add_modifier(Modifier::DIM);
            header_style = header_style.add_modifier(Modifier::DIM);
        }

        let left = rect.x;
        let top = rect.y;
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        for x in left..=right {
            let (top_symbol, bottom_symbol) = if x == left {
                ("╭", "╰")
            } else if x == right {
                ("╮", "╯")
            } else {
                ("─", "─")
            };
            Self::put(frame, bounds, x, top, top_symbol, border_style);
            Self::put(frame, bounds, x, bottom, bottom_symbol, border_style);
        }
        for y in top + 1..bottom {
            Self::put(frame, bounds, left, y, "│", border_style);
            Self::put(frame, bounds, right, y, "│", border_style);
        }

        let header_y = top + 1;
        if header_y >= bottom {
            return;
        }
        for x in left + 1..right {
            Self::put(frame, bounds, x, header_y, " ", header_style);
        }
        let lights = [
            theme::close_light(),
            theme::minimize_light(),
            theme::maximize_light(),
        ];
        for (offset, color) in BUTTON_COLUMNS.iter().zip(lights) {
            let x = left + offset;
            if x < right {
                let style = if focused {
                    header_style.fg(color)
                } else {
                    header_style.fg(theme::muted_fg())
                };
                Self::put(frame, bounds, x, header_y, BUTTON_GLYPH, style);
            }
        }

        let title_len = title.chars().count() as i32;
        let inner_width = rect.width as i32 - 2;
        let reserved = BUTTON_COLUMNS[2] + 2;
        if title_len > 0 && title_len + reserved * 2 <= inner_width + 2 {
            let start = left + 1 + (inner_width - title_len) / 2;
            for (idx, ch) in title.chars().enumerate() {
                let mut buf = [0u8; 4];
                Self::put(
                    frame,
                    bounds,
                    start + idx as i32,
                    header_y,
                    ch.encode_utf8(&mut buf),
                    header_style,
                );
            }
        }
    }
}
