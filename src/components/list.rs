use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use super::{Component, ComponentContext, left_click};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

/// One row: a label on the left, an optional detail right-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub detail: String,
}

impl ListEntry {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }
}

/// Static listing with an optional heading block. Backs the blog reader
/// and the about panel.
#[derive(Debug)]
pub struct ListComponent {
    heading: Vec<String>,
    items: Vec<ListEntry>,
    selected: usize,
    offset: usize,
    // rows are buttons; clicking them selects without raising the window
    selectable: bool,
    area: Rect,
}

impl ListComponent {
    pub fn new(items: Vec<ListEntry>) -> Self {
        Self {
            heading: Vec::new(),
            items,
            selected: 0,
            offset: 0,
            selectable: true,
            area: Rect::default(),
        }
    }

    pub fn with_heading(mut self, heading: Vec<String>) -> Self {
        self.heading = heading;
        self
    }

    /// Read-only rows: no selection highlight, clicks count as plain
    /// content clicks.
    pub fn read_only(mut self) -> Self {
        self.selectable = false;
        self
    }

    pub fn items(&self) -> &[ListEntry] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    fn list_top(&self) -> u16 {
        if self.heading.is_empty() {
            0
        } else {
            self.heading.len() as u16 + 1
        }
    }

    fn view_rows(&self) -> usize {
        self.area.height.saturating_sub(self.list_top()) as usize
    }

    fn keep_selected_in_view(&mut self) {
        let view = self.view_rows();
        if view == 0 || self.items.is_empty() {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + view {
            self.offset = self.selected + 1 - view;
        }
    }

    /// Item index displayed on content row `row`.
    fn item_at_row(&self, row: u16) -> Option<usize> {
        let top = self.list_top();
        if row < top || row >= self.area.height {
            return None;
        }
        let index = self.offset + (row - top) as usize;
        (index < self.items.len()).then_some(index)
    }

    fn format_entry(entry: &ListEntry, width: usize) -> String {
        let detail_len = entry.detail.chars().count();
        if detail_len == 0 || detail_len + 2 >= width {
            return truncate_to_width(&entry.label, width);
        }
        let label_width = width - detail_len - 1;
        let label = truncate_to_width(&entry.label, label_width);
        let pad = width - label.chars().count() - detail_len;
        format!("{label}{}{}", " ".repeat(pad), entry.detail)
    }
}

impl Component for ListComponent {
    fn resize(&mut self, area: Rect) {
        self.area = area;
        self.keep_selected_in_view();
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.resize(area);
        let body = Style::default().fg(theme::body_fg()).bg(theme::body_bg());
        frame.fill(area, body);
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (idx, line) in self.heading.iter().enumerate() {
            let style = if idx == 0 {
                body.add_modifier(Modifier::BOLD)
            } else {
                body.fg(theme::muted_fg())
            };
            frame.set_string(area.x + 1, area.y + idx as u16, line, style);
        }

        let top = self.list_top();
        let inner = Rect {
            x: area.x,
            y: area.y + top.min(area.height),
            width: area.width,
            height: area.height.saturating_sub(top),
        };
        if inner.height == 0 {
            return;
        }

        let width = inner.width.saturating_sub(2) as usize;
        let items = self
            .items
            .iter()
            .skip(self.offset)
            .take(inner.height as usize)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(" "),
                    Span::raw(Self::format_entry(entry, width)),
                ]))
            })
            .collect::<Vec<_>>();

        let mut state = ListState::default();
        if self.selectable && !self.items.is_empty() && self.selected >= self.offset {
            state.select(Some(self.selected - self.offset));
        }
        let highlight = if ctx.focused() {
            Style::default()
                .fg(theme::body_bg())
                .bg(theme::accent())
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        };
        let list = List::new(items).style(body).highlight_style(highlight);
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if let Some((_, row)) = left_click(event) {
            if !self.selectable {
                return false;
            }
            return match self.item_at_row(row) {
                Some(index) => {
                    self.selected = index;
                    true
                }
                None => false,
            };
        }
        let Event::Key(key) = event else {
            return false;
        };
        if !self.selectable {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                true
            }
            KeyCode::PageUp => {
                self.move_selection(-5);
                true
            }
            KeyCode::PageDown => {
                self.move_selection(5);
                true
            }
            KeyCode::Home => {
                self.selected = 0;
                true
            }
            KeyCode::End => {
                if !self.items.is_empty() {
                    self.selected = self.items.len() - 1;
                }
                true
            }
            _ => false,
        }
    }

    fn is_interactive(&self, _column: u16, row: u16) -> bool {
        self.selectable && self.item_at_row(row).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::buffer::Buffer;

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn entries(n: usize) -> Vec<ListEntry> {
        (0..n)
            .map(|i| ListEntry::new(format!("item {i}"), ""))
            .collect()
    }

    #[test]
    fn selection_moves_with_keys() {
        let ctx = ComponentContext::default();
        let mut list = ListComponent::new(entries(4));
        list.handle_event(&key_event(KeyCode::Down), &ctx);
        assert_eq!(list.selected(), 1);
        list.handle_event(&key_event(KeyCode::End), &ctx);
        assert_eq!(list.selected(), 3);
        list.handle_event(&key_event(KeyCode::Home), &ctx);
        assert_eq!(list.selected(), 0);
        list.handle_event(&key_event(KeyCode::Up), &ctx);
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn rows_below_heading_are_interactive() {
        let ctx = ComponentContext::default();
        let mut list =
            ListComponent::new(entries(3)).with_heading(vec!["Title".into(), "sub".into()]);
        list.resize(Rect::new(0, 0, 30, 10));
        // heading (2 rows) plus a blank spacer
        assert!(!list.is_interactive(0, 0));
        assert!(!list.is_interactive(0, 2));
        assert!(list.is_interactive(0, 3));
        assert!(list.is_interactive(0, 5));
        assert!(!list.is_interactive(0, 6));
        assert!(list.handle_event(&click(4, 4), &ctx));
        assert_eq!(list.selected(), 1);
    }

    #[test]
    fn read_only_rows_are_plain_content() {
        let list = {
            let mut l = ListComponent::new(entries(3)).read_only();
            l.resize(Rect::new(0, 0, 30, 10));
            l
        };
        assert!(!list.is_interactive(0, 0));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let ctx = ComponentContext::default();
        let mut list = ListComponent::new(entries(20));
        list.resize(Rect::new(0, 0, 20, 5));
        list.set_selected(12);
        list.resize(Rect::new(0, 0, 20, 5));
        assert_eq!(list.offset, 8);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        list.render(&mut frame, area, &ctx);
        let row: String = (0..20)
            .map(|x| buf.cell((x, 4)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("item 12"));
    }

    #[test]
    fn details_are_right_aligned() {
        let line = ListComponent::format_entry(&ListEntry::new("Memory", "16 GB"), 20);
        assert_eq!(line.chars().count(), 20);
        assert!(line.starts_with("Memory"));
        assert!(line.ends_with("16 GB"));
    }
}
