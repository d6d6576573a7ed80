use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

const MENUS: [&str; 6] = ["File", "Edit", "View", "Go", "Window", "Help"];

/// Top row: the active app's name and its menus on the left, a status line
/// (usually the latest log message) on the right.
#[derive(Debug, Default)]
pub struct MenuBar;

impl MenuBar {
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, app_name: &str, status: Option<&str>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().fg(theme::menu_fg()).bg(theme::menu_bg());
        let row = Rect { height: 1, ..area };
        frame.fill(row, base);

        let mut x = area.x + 1;
        frame.set_string(x, area.y, "◆", base);
        x += 2;
        frame.set_string(x, area.y, app_name, base.add_modifier(Modifier::BOLD));
        x += app_name.chars().count() as u16 + 2;
        for menu in MENUS {
            frame.set_string(x, area.y, menu, base);
            x += menu.chars().count() as u16 + 2;
        }

        let Some(status) = status else {
            return;
        };
        let right_edge = area.x + area.width;
        let room = right_edge.saturating_sub(x + 2) as usize;
        if room < 8 {
            return;
        }
        let text = truncate_to_width(status.trim(), room);
        let start = right_edge - 1 - text.chars().count() as u16;
        frame.set_string(start, area.y, &text, base.fg(theme::muted_fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_app_menus_and_status() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        MenuBar.render(&mut frame, area, "Finder", Some("focus changed"));
        let text = row_text(&buf, 80);
        assert!(text.contains("Finder  File  Edit"));
        assert!(text.trim_end().ends_with("focus changed"));
    }

    #[test]
    fn status_is_dropped_when_cramped() {
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        MenuBar.render(&mut frame, area, "About This Mac", Some("a long status line"));
        assert!(!row_text(&buf, 50).contains("status"));
    }
}
