use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, left_click};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

const FOLDER_NAME: &str = "Documents";
const GRID_BUTTON: (u16, u16) = (1, 6);
const LIST_BUTTON: (u16, u16) = (8, 13);
const HEADER_ROWS: u16 = 2;
const GRID_CELL_WIDTH: u16 = 18;
const GRID_CELL_HEIGHT: u16 = 3;
const SIZE_WIDTH: usize = 9;
const DATE_WIDTH: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Audio,
    Document,
    Folder,
}

impl FileKind {
    fn icon(self) -> &'static str {
        match self {
            FileKind::Image => "▣",
            FileKind::Audio => "♪",
            FileKind::Document => "≡",
            FileKind::Folder => "▤",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FileKind::Image => "Image",
            FileKind::Audio => "Audio",
            FileKind::Document => "Document",
            FileKind::Folder => "Folder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: FileKind,
    pub size: Option<String>,
    pub date: String,
}

impl FileEntry {
    pub fn new(
        name: impl Into<String>,
        kind: FileKind,
        size: Option<&str>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            size: size.map(String::from),
            date: date.into(),
        }
    }

    pub fn size_label(&self) -> &str {
        self.size.as_deref().unwrap_or("—")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// File browser over a fixed folder: icon grid or detail list, with an
/// image preview panel.
#[derive(Debug)]
pub struct FinderComponent {
    files: Vec<FileEntry>,
    mode: ViewMode,
    selected: usize,
    // first visible layout row (a grid row or a list line)
    offset: usize,
    preview: Option<usize>,
    area: Rect,
}

impl FinderComponent {
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self {
            files,
            mode: ViewMode::default(),
            selected: 0,
            offset: 0,
            preview: None,
            area: Rect::default(),
        }
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn preview(&self) -> Option<&FileEntry> {
        self.preview.and_then(|idx| self.files.get(idx))
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.offset = 0;
            self.keep_selected_in_view();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(match self.mode {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        });
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.files.len() {
            return false;
        }
        self.selected = index;
        self.keep_selected_in_view();
        true
    }

    /// Opens the preview for the selected file. Only images have one.
    pub fn open_selected(&mut self) -> bool {
        let is_image = self
            .files
            .get(self.selected)
            .is_some_and(|f| f.kind == FileKind::Image);
        if is_image {
            self.preview = Some(self.selected);
        }
        is_image
    }

    pub fn close_preview(&mut self) -> bool {
        self.preview.take().is_some()
    }

    fn columns(&self) -> usize {
        match self.mode {
            ViewMode::Grid => (self.area.width.saturating_sub(2) / GRID_CELL_WIDTH).max(1) as usize,
            ViewMode::List => 1,
        }
    }

    fn row_height(&self) -> u16 {
        match self.mode {
            ViewMode::Grid => GRID_CELL_HEIGHT,
            ViewMode::List => 1,
        }
    }

    fn body_top(&self) -> u16 {
        match self.mode {
            ViewMode::Grid => HEADER_ROWS,
            // column titles
            ViewMode::List => HEADER_ROWS + 1,
        }
    }

    fn visible_rows(&self) -> usize {
        (self.area.height.saturating_sub(self.body_top()) / self.row_height()) as usize
    }

    fn keep_selected_in_view(&mut self) {
        let view = self.visible_rows();
        if view == 0 {
            self.offset = 0;
            return;
        }
        let row = self.selected / self.columns();
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + view {
            self.offset = row + 1 - view;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.files.is_empty() {
            return;
        }
        let last = self.files.len() - 1;
        let target = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selected + delta as usize).min(last)
        };
        self.select(target);
    }

    /// File index under a content cell.
    fn file_at(&self, column: u16, row: u16) -> Option<usize> {
        let top = self.body_top();
        if row < top || row >= self.area.height || column == 0 {
            return None;
        }
        let layout_row = self.offset + ((row - top) / self.row_height()) as usize;
        let column_idx = match self.mode {
            ViewMode::Grid => {
                let idx = ((column - 1) / GRID_CELL_WIDTH) as usize;
                if idx >= self.columns() {
                    return None;
                }
                idx
            }
            ViewMode::List => 0,
        };
        let index = layout_row * self.columns() + column_idx;
        (index < self.files.len()).then_some(index)
    }

    fn render_grid(&self, frame: &mut UiFrame<'_>, area: Rect, body: Style, highlight: Style) {
        let columns = self.columns();
        let label_width = GRID_CELL_WIDTH.saturating_sub(2) as usize;
        let first = self.offset * columns;
        let last = first + self.visible_rows() * columns;
        for (index, file) in self.files.iter().enumerate().take(last).skip(first) {
            let slot = index - first;
            let x = area.x + 1 + (slot % columns) as u16 * GRID_CELL_WIDTH;
            let y = area.y + HEADER_ROWS + (slot / columns) as u16 * GRID_CELL_HEIGHT;
            let style = if index == self.selected { highlight } else { body };
            let icon = format!("{:^label_width$}", file.kind.icon());
            let name = truncate_to_width(&file.name, label_width);
            frame.set_string(x, y, &icon, style);
            frame.set_string(x, y + 1, &format!("{name:^label_width$}"), style);
        }
    }

    fn render_list(&self, frame: &mut UiFrame<'_>, area: Rect, body: Style, highlight: Style) {
        let width = area.width.saturating_sub(2) as usize;
        let name_width = width.saturating_sub(SIZE_WIDTH + DATE_WIDTH + 4);
        let titles = format!(
            "  {:<name_width$} {:<SIZE_WIDTH$} {}",
            "Name", "Size", "Date Modified"
        );
        frame.set_string(
            area.x + 1,
            area.y + HEADER_ROWS,
            &truncate_to_width(&titles, width),
            body.fg(theme::muted_fg()),
        );
        let rows = self.visible_rows();
        for (line, (index, file)) in self
            .files
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(rows)
            .enumerate()
        {
            let text = format!(
                "{} {:<name_width$} {:<SIZE_WIDTH$} {}",
                file.kind.icon(),
                truncate_to_width(&file.name, name_width),
                file.size_label(),
                file.date
            );
            let style = if index == self.selected { highlight } else { body };
            frame.set_string(
                area.x + 1,
                area.y + self.body_top() + line as u16,
                &truncate_to_width(&text, width),
                style,
            );
        }
    }

    fn render_preview(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let Some(file) = self.preview() else {
            return;
        };
        let width = area.width.saturating_sub(4).min(48);
        let height = area.height.saturating_sub(2).min(7);
        if width < 10 || height < 3 {
            return;
        }
        let panel = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let panel_style = Style::default().fg(theme::body_bg()).bg(theme::body_fg());
        frame.fill(panel, panel_style);
        let inner = width.saturating_sub(2) as usize;
        let lines = [
            (file.name.clone(), panel_style.add_modifier(Modifier::BOLD)),
            (String::new(), panel_style),
            (
                format!("{} · {}", file.kind.label(), file.size_label()),
                panel_style,
            ),
            (file.date.clone(), panel_style),
            (String::new(), panel_style),
            ("Esc or click to close".to_string(), panel_style.add_modifier(Modifier::DIM)),
        ];
        for (row, (text, style)) in lines.iter().enumerate().take(height as usize - 1) {
            frame.set_string(
                panel.x + 1,
                panel.y + row as u16,
                &truncate_to_width(text, inner),
                *style,
            );
        }
    }
}

fn on_button(span: (u16, u16), column: u16, row: u16) -> bool {
    row == 0 && column >= span.0 && column <= span.1
}

impl Component for FinderComponent {
    fn resize(&mut self, area: Rect) {
        self.area = area;
        self.keep_selected_in_view();
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.resize(area);
        let body = Style::default().fg(theme::body_fg()).bg(theme::body_bg());
        let muted = body.fg(theme::muted_fg());
        frame.fill(area, body);
        if area.width < 4 || area.height == 0 {
            return;
        }

        let button = |active: bool| {
            if active {
                body.fg(theme::accent()).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                body.fg(theme::accent())
            }
        };
        frame.set_string(
            area.x + GRID_BUTTON.0,
            area.y,
            "[Grid]",
            button(self.mode == ViewMode::Grid),
        );
        frame.set_string(
            area.x + LIST_BUTTON.0,
            area.y,
            "[List]",
            button(self.mode == ViewMode::List),
        );
        let title = format!("{FOLDER_NAME} · {} items", self.files.len());
        let title_x = LIST_BUTTON.1 + 3;
        if area.width > title_x {
            let room = (area.width - title_x) as usize;
            frame.set_string(
                area.x + title_x,
                area.y,
                &truncate_to_width(&title, room),
                body.add_modifier(Modifier::BOLD),
            );
        }
        if area.height > 1 {
            frame.set_string(area.x, area.y + 1, &"─".repeat(area.width as usize), muted);
        }

        let highlight = if ctx.focused() {
            Style::default().fg(theme::body_bg()).bg(theme::accent())
        } else {
            body.add_modifier(Modifier::REVERSED)
        };
        match self.mode {
            ViewMode::Grid => self.render_grid(frame, area, body, highlight),
            ViewMode::List => self.render_list(frame, area, body, highlight),
        }
        self.render_preview(frame, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if let Some((column, row)) = left_click(event) {
            if self.close_preview() {
                return true;
            }
            if on_button(GRID_BUTTON, column, row) {
                self.set_mode(ViewMode::Grid);
                return true;
            }
            if on_button(LIST_BUTTON, column, row) {
                self.set_mode(ViewMode::List);
                return true;
            }
            return match self.file_at(column, row) {
                Some(index) => {
                    self.select(index);
                    self.open_selected();
                    true
                }
                None => false,
            };
        }
        let Event::Key(key) = event else {
            return false;
        };
        if self.preview.is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => self.close_preview(),
                _ => false,
            };
        }
        let step = self.columns() as isize;
        match key.code {
            KeyCode::Char('v') => self.toggle_mode(),
            KeyCode::Char('g') => self.set_mode(ViewMode::Grid),
            KeyCode::Char('l') => self.set_mode(ViewMode::List),
            KeyCode::Left | KeyCode::Char('h') if self.mode == ViewMode::Grid => {
                self.move_selection(-1)
            }
            KeyCode::Right if self.mode == ViewMode::Grid => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-step),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(step),
            KeyCode::Home => {
                self.select(0);
            }
            KeyCode::End => {
                self.select(self.files.len().saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => return self.open_selected(),
            _ => return false,
        }
        true
    }

    fn is_interactive(&self, column: u16, row: u16) -> bool {
        on_button(GRID_BUTTON, column, row)
            || on_button(LIST_BUTTON, column, row)
            || self.file_at(column, row).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::buffer::Buffer;

    fn finder() -> FinderComponent {
        let mut c = FinderComponent::new(vec![
            FileEntry::new("2greedy.png", FileKind::Image, Some("2.4 MB"), "Dec 1, 2024"),
            FileEntry::new("2 greedy.mp3", FileKind::Audio, Some("4.2 MB"), "Dec 5, 2024"),
            FileEntry::new("Documents", FileKind::Folder, None, "Nov 10, 2024"),
            FileEntry::new("Notes.txt", FileKind::Document, Some("12 KB"), "Dec 8, 2024"),
            FileEntry::new("Cardigan.png", FileKind::Image, Some("1.8 MB"), "Nov 28, 2024"),
        ]);
        // room for 4 grid columns
        c.resize(Rect::new(0, 0, 76, 20));
        c
    }

    fn key(code: KeyCode) -> Event {
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

    fn rows(c: &mut FinderComponent, area: Rect) -> Vec<String> {
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        c.render(&mut frame, area, &ComponentContext::default());
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()).to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn starts_in_grid_and_toggles() {
        let ctx = ComponentContext::default();
        let mut c = finder();
        assert_eq!(c.mode(), ViewMode::Grid);
        assert!(c.handle_event(&key(KeyCode::Char('v')), &ctx));
        assert_eq!(c.mode(), ViewMode::List);
        assert!(c.handle_event(&click(GRID_BUTTON.0 + 1, 0), &ctx));
        assert_eq!(c.mode(), ViewMode::Grid);
        assert!(c.handle_event(&click(LIST_BUTTON.0 + 1, 0), &ctx));
        assert_eq!(c.mode(), ViewMode::List);
    }

    #[test]
    fn grid_arrows_move_by_row() {
        let ctx = ComponentContext::default();
        let mut c = finder();
        c.handle_event(&key(KeyCode::Down), &ctx);
        assert_eq!(c.selected(), 4);
        c.handle_event(&key(KeyCode::Left), &ctx);
        assert_eq!(c.selected(), 3);
        c.set_mode(ViewMode::List);
        c.handle_event(&key(KeyCode::Up), &ctx);
        assert_eq!(c.selected(), 2);
    }

    #[test]
    fn clicking_a_grid_cell_selects_it() {
        let ctx = ComponentContext::default();
        let mut c = finder();
        // third cell of the first grid row
        assert!(c.is_interactive(1 + GRID_CELL_WIDTH * 2 + 3, HEADER_ROWS));
        assert!(c.handle_event(&click(1 + GRID_CELL_WIDTH * 2 + 3, HEADER_ROWS + 1), &ctx));
        assert_eq!(c.selected(), 2);
        // folders have no preview
        assert!(c.preview().is_none());
        // past the last file
        assert!(!c.is_interactive(1 + GRID_CELL_WIDTH * 2, HEADER_ROWS + GRID_CELL_HEIGHT));
    }

    #[test]
    fn images_open_a_preview() {
        let ctx = ComponentContext::default();
        let mut c = finder();
        c.set_mode(ViewMode::List);
        // list rows start under the column titles
        assert!(c.handle_event(&click(5, HEADER_ROWS + 1 + 4), &ctx));
        assert_eq!(c.preview().map(|f| f.name.as_str()), Some("Cardigan.png"));
        let shown = rows(&mut c, Rect::new(0, 0, 76, 20)).join("\n");
        assert!(shown.contains("Image · 1.8 MB"));

        // any click dismisses it without selecting
        assert!(c.handle_event(&click(5, HEADER_ROWS + 1), &ctx));
        assert!(c.preview().is_none());
        assert_eq!(c.selected(), 4);

        c.select(1);
        assert!(!c.open_selected());
        c.select(0);
        assert!(c.handle_event(&key(KeyCode::Enter), &ctx));
        assert!(c.handle_event(&key(KeyCode::Esc), &ctx));
        assert!(c.preview().is_none());
    }

    #[test]
    fn list_view_shows_details() {
        let mut c = finder();
        c.set_mode(ViewMode::List);
        let shown = rows(&mut c, Rect::new(0, 0, 76, 20));
        assert!(shown[0].contains("Documents · 5 items"));
        assert!(shown[2].contains("Date Modified"));
        assert!(shown[3].contains("2greedy.png") && shown[3].contains("Dec 1, 2024"));
        assert!(shown[5].contains("—"));
    }
}
