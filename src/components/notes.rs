use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, left_click};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

const SIDEBAR_WIDTH: u16 = 22;
const NEW_BUTTON: (u16, u16) = (1, 7);
const DELETE_BUTTON: (u16, u16) = (9, 15);
const FIRST_NOTE_ROW: u16 = 2;
const TITLE_ROW: u16 = 0;
const FIRST_BODY_ROW: u16 = 2;
const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Body,
}

/// Note list on the left, title + body editor on the right.
///
/// Edits live in a draft until saved. Switching notes, creating a note and
/// closing the window all save first; empty drafts are never stored.
/// Deleting asks for a `y` before the note goes away.
#[derive(Debug)]
pub struct NotesComponent {
    notes: Vec<Note>,
    // None while editing a note that was never saved
    current: Option<usize>,
    title: String,
    body: String,
    field: Field,
    // note waiting for delete confirmation
    pending_delete: Option<usize>,
}

impl NotesComponent {
    pub fn new(notes: Vec<Note>) -> Self {
        let mut this = Self {
            notes,
            current: None,
            title: String::new(),
            body: String::new(),
            field: Field::Body,
            pending_delete: None,
        };
        if !this.notes.is_empty() {
            this.load(0);
        }
        this
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn draft(&self) -> (&str, &str) {
        (&self.title, &self.body)
    }

    fn load(&mut self, index: usize) {
        if let Some(note) = self.notes.get(index) {
            self.current = Some(index);
            self.title = note.title.clone();
            self.body = note.content.clone();
        }
    }

    /// Stores the draft. Returns whether anything was written.
    pub fn save(&mut self) -> bool {
        if self.title.trim().is_empty() && self.body.trim().is_empty() {
            return false;
        }
        let title = match self.title.trim() {
            "" => UNTITLED.to_string(),
            trimmed => trimmed.to_string(),
        };
        let note = Note::new(title, self.body.clone());
        match self.current {
            Some(index) if index < self.notes.len() => {
                if self.notes[index] == note {
                    return false;
                }
                self.notes[index] = note;
            }
            _ => {
                self.notes.push(note);
                self.current = Some(self.notes.len() - 1);
            }
        }
        tracing::debug!(note = ?self.current, "note saved");
        true
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.notes.len() {
            return false;
        }
        self.save();
        self.load(index);
        true
    }

    pub fn new_note(&mut self) {
        self.save();
        self.current = None;
        self.title.clear();
        self.body.clear();
        self.field = Field::Body;
    }

    /// Removes a stored note. Deleting the open note clears the editor;
    /// the draft of any other open note is kept.
    pub fn delete(&mut self, index: usize) -> bool {
        if index >= self.notes.len() {
            return false;
        }
        let removed = self.notes.remove(index);
        self.pending_delete = None;
        match self.current {
            Some(current) if current == index => {
                self.current = None;
                self.title.clear();
                self.body.clear();
                self.field = Field::Body;
            }
            Some(current) if current > index => self.current = Some(current - 1),
            _ => {}
        }
        tracing::debug!(title = %removed.title, "note deleted");
        true
    }

    /// Asks to delete the open note; [`Self::confirm_delete`] finishes it.
    pub fn request_delete(&mut self) -> bool {
        self.pending_delete = self.current;
        self.pending_delete.is_some()
    }

    pub fn pending_delete(&self) -> Option<usize> {
        self.pending_delete
    }

    pub fn confirm_delete(&mut self) -> bool {
        match self.pending_delete.take() {
            Some(index) => self.delete(index),
            None => false,
        }
    }

    fn editing(&mut self) -> &mut String {
        match self.field {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    fn note_at_row(&self, row: u16) -> Option<usize> {
        if row < FIRST_NOTE_ROW {
            return None;
        }
        let index = (row - FIRST_NOTE_ROW) as usize;
        (index < self.notes.len()).then_some(index)
    }

    fn in_editor(&self, column: u16) -> bool {
        column > SIDEBAR_WIDTH
    }
}

impl Component for NotesComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let body = Style::default().fg(theme::body_fg()).bg(theme::body_bg());
        let muted = body.fg(theme::muted_fg());
        frame.fill(area, body);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let x = area.x;
        let y = area.y;

        frame.set_string(
            x + NEW_BUTTON.0,
            y,
            "[+ New]",
            body.fg(theme::accent()).add_modifier(Modifier::BOLD),
        );
        let delete_style = if self.current.is_some() {
            body.fg(theme::accent()).add_modifier(Modifier::BOLD)
        } else {
            muted
        };
        frame.set_string(x + DELETE_BUTTON.0, y, "[- Del]", delete_style);
        let list_width = SIDEBAR_WIDTH.saturating_sub(2) as usize;
        for (idx, note) in self.notes.iter().enumerate() {
            let row = FIRST_NOTE_ROW + idx as u16;
            if row >= area.height {
                break;
            }
            let style = if Some(idx) == self.current {
                body.add_modifier(Modifier::REVERSED)
            } else {
                body
            };
            frame.set_string(
                x + 1,
                y + row,
                &truncate_to_width(&note.title, list_width),
                style,
            );
        }
        for row in 0..area.height {
            frame.set_string(x + SIDEBAR_WIDTH, y + row, "│", muted);
        }

        let editor_x = x + SIDEBAR_WIDTH + 2;
        let editor_width = area.width.saturating_sub(SIDEBAR_WIDTH + 3) as usize;
        let active = body.add_modifier(Modifier::UNDERLINED);
        let title_style = if self.field == Field::Title && ctx.focused() {
            active.add_modifier(Modifier::BOLD)
        } else {
            body.add_modifier(Modifier::BOLD)
        };
        let (title, title_style) = if self.title.is_empty() {
            (UNTITLED, title_style.fg(theme::muted_fg()))
        } else {
            (self.title.as_str(), title_style)
        };
        if let Some(index) = self.pending_delete {
            let name = self.notes.get(index).map_or(UNTITLED, |n| n.title.as_str());
            let prompt = format!("Delete \"{name}\"? [y/n]");
            frame.set_string(
                editor_x,
                y + TITLE_ROW,
                &truncate_to_width(&prompt, editor_width),
                body.fg(theme::accent()).add_modifier(Modifier::BOLD),
            );
        } else {
            frame.set_string(
                editor_x,
                y + TITLE_ROW,
                &truncate_to_width(title, editor_width),
                title_style,
            );
        }
        frame.set_string(
            editor_x,
            y + TITLE_ROW + 1,
            &"─".repeat(editor_width),
            muted,
        );

        let lines: Vec<&str> = self.body.split('\n').collect();
        let rows = area.height.saturating_sub(FIRST_BODY_ROW) as usize;
        // keep the end of the draft (where typing happens) visible
        let skip = lines.len().saturating_sub(rows);
        for (offset, line) in lines.iter().skip(skip).enumerate() {
            frame.set_string(
                editor_x,
                y + FIRST_BODY_ROW + offset as u16,
                &truncate_to_width(line, editor_width),
                body,
            );
        }
        if ctx.focused() && self.field == Field::Body {
            let last = lines.last().map(|l| l.chars().count()).unwrap_or(0);
            let row = FIRST_BODY_ROW as usize + lines.len().saturating_sub(skip + 1);
            if last < editor_width && row < area.height as usize {
                frame.set_string(
                    editor_x + last as u16,
                    y + row as u16,
                    "▏",
                    body.fg(theme::accent()),
                );
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if let Some((column, row)) = left_click(event) {
            if on_button(DELETE_BUTTON, column, row) {
                return if self.pending_delete.is_some() {
                    self.confirm_delete()
                } else {
                    self.request_delete()
                };
            }
            self.pending_delete = None;
            if on_button(NEW_BUTTON, column, row) {
                self.new_note();
                return true;
            }
            if column < SIDEBAR_WIDTH {
                return self.note_at_row(row).is_some_and(|idx| self.select(idx));
            }
            if self.in_editor(column) {
                self.field = if row == TITLE_ROW {
                    Field::Title
                } else {
                    Field::Body
                };
                return true;
            }
            return false;
        }
        let Event::Key(key) = event else {
            return false;
        };
        if self.pending_delete.is_some() {
            if key.code == KeyCode::Char('y') {
                return self.confirm_delete();
            }
            self.pending_delete = None;
            return true;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('d') => self.request_delete(),
                KeyCode::Char('n') => {
                    self.new_note();
                    true
                }
                KeyCode::Char('s') => {
                    self.save();
                    true
                }
                _ => false,
            };
        }
        match key.code {
            KeyCode::Char(c) => {
                self.editing().push(c);
                true
            }
            KeyCode::Enter => {
                match self.field {
                    Field::Title => self.field = Field::Body,
                    Field::Body => self.body.push('\n'),
                }
                true
            }
            KeyCode::Backspace => {
                self.editing().pop();
                true
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.field = match self.field {
                    Field::Title => Field::Body,
                    Field::Body => Field::Title,
                };
                true
            }
            KeyCode::PageUp => {
                let prev = self.current.unwrap_or(0).saturating_sub(1);
                self.select(prev)
            }
            KeyCode::PageDown => {
                let next = self.current.map_or(0, |idx| idx + 1);
                self.select(next)
            }
            _ => false,
        }
    }

    fn is_interactive(&self, column: u16, row: u16) -> bool {
        if on_button(NEW_BUTTON, column, row) || on_button(DELETE_BUTTON, column, row) {
            return true;
        }
        if column < SIDEBAR_WIDTH {
            return self.note_at_row(row).is_some();
        }
        self.in_editor(column)
    }

    fn before_close(&mut self) {
        if self.save() {
            tracing::info!("saved note draft before close");
        }
    }
}

fn on_button(span: (u16, u16), column: u16, row: u16) -> bool {
    row == 0 && column >= span.0 && column <= span.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

    fn notes() -> NotesComponent {
        NotesComponent::new(vec![
            Note::new("Where Have I Been ?", "I took some time"),
            Note::new("Admin Notes", "prelaunch version 0.1"),
        ])
    }

    fn type_text(c: &mut NotesComponent, text: &str) {
        let ctx = ComponentContext::default();
        for ch in text.chars() {
            let code = if ch == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(ch)
            };
            c.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &ctx);
        }
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn opens_first_note() {
        let c = notes();
        assert_eq!(c.current(), Some(0));
        assert_eq!(c.draft(), ("Where Have I Been ?", "I took some time"));
    }

    #[test]
    fn draft_is_saved_before_close() {
        let mut c = notes();
        type_text(&mut c, "\nmore");
        assert_eq!(c.notes()[0].content, "I took some time");
        c.before_close();
        assert_eq!(c.notes()[0].content, "I took some time\nmore");
    }

    #[test]
    fn switching_notes_saves_first() {
        let ctx = ComponentContext::default();
        let mut c = notes();
        type_text(&mut c, "!");
        assert!(c.handle_event(&click(2, FIRST_NOTE_ROW + 1), &ctx));
        assert_eq!(c.current(), Some(1));
        assert_eq!(c.notes()[0].content, "I took some time!");
        assert_eq!(c.draft().0, "Admin Notes");
    }

    #[test]
    fn new_note_is_stored_only_when_saved() {
        let ctx = ComponentContext::default();
        let mut c = notes();
        assert!(c.handle_event(&click(3, 0), &ctx));
        assert_eq!(c.current(), None);
        assert_eq!(c.draft(), ("", ""));
        // a second blank note doesn't store the first
        c.new_note();
        assert_eq!(c.notes().len(), 2);
        type_text(&mut c, "groceries");
        c.before_close();
        assert_eq!(c.notes().len(), 3);
        assert_eq!(c.notes()[2], Note::new("Untitled", "groceries"));
        assert_eq!(c.current(), Some(2));
    }

    #[test]
    fn empty_draft_is_not_saved() {
        let mut c = NotesComponent::new(Vec::new());
        assert!(!c.save());
        c.before_close();
        assert!(c.notes().is_empty());
    }

    #[test]
    fn editor_and_buttons_are_interactive() {
        let c = notes();
        assert!(c.is_interactive(4, 0));
        assert!(c.is_interactive(12, 0));
        assert!(!c.is_interactive(18, 0));
        assert!(c.is_interactive(2, FIRST_NOTE_ROW));
        assert!(!c.is_interactive(2, FIRST_NOTE_ROW + 5));
        assert!(!c.is_interactive(SIDEBAR_WIDTH, 4));
        assert!(c.is_interactive(SIDEBAR_WIDTH + 5, 4));
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn deleting_open_note_clears_editor() {
        let mut c = notes();
        assert!(c.delete(0));
        assert_eq!(c.notes().len(), 1);
        assert_eq!(c.current(), None);
        assert_eq!(c.draft(), ("", ""));
        // nothing to save on close
        c.before_close();
        assert_eq!(c.notes().len(), 1);
    }

    #[test]
    fn deleting_another_note_keeps_selection() {
        let mut c = notes();
        c.select(1);
        assert!(c.delete(0));
        assert_eq!(c.current(), Some(0));
        assert_eq!(c.draft().0, "Admin Notes");
        assert!(!c.delete(5));
    }

    #[test]
    fn delete_needs_confirmation() {
        let ctx = ComponentContext::default();
        let mut c = notes();
        assert!(c.handle_event(&ctrl('d'), &ctx));
        assert_eq!(c.pending_delete(), Some(0));
        // any other key backs out without typing into the draft
        type_text(&mut c, "x");
        assert_eq!(c.pending_delete(), None);
        assert_eq!(c.notes().len(), 2);
        assert_eq!(c.draft().1, "I took some time");

        c.handle_event(&ctrl('d'), &ctx);
        type_text(&mut c, "y");
        assert_eq!(c.notes().len(), 1);
        assert_eq!(c.notes()[0].title, "Admin Notes");
    }

    #[test]
    fn delete_button_asks_then_deletes() {
        let ctx = ComponentContext::default();
        let mut c = notes();
        assert!(c.handle_event(&click(DELETE_BUTTON.0 + 2, 0), &ctx));
        assert_eq!(c.notes().len(), 2);
        assert!(c.handle_event(&click(DELETE_BUTTON.0 + 2, 0), &ctx));
        assert_eq!(c.notes().len(), 1);
        // no open note left to delete
        assert!(!c.handle_event(&click(DELETE_BUTTON.0 + 2, 0), &ctx));
    }
}
