use std::any::Any;
use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod finder;
pub mod list;
pub mod mail;
pub mod music_player;
pub mod notes;

pub use finder::{FileEntry, FileKind, FinderComponent, ViewMode};
pub use list::{ListComponent, ListEntry};
pub use mail::MailComponent;
pub use music_player::MusicPlayerComponent;
pub use notes::{Note, NotesComponent};

pub use crate::component_context::ComponentContext;

/// Content hosted inside a floating window.
///
/// Coordinates are always relative to the window's content area: `render`
/// receives a frame whose origin is the top-left content cell and mouse
/// events arrive translated into that space.
pub trait Component {
    /// Called with the content area before rendering and before input is
    /// routed, so layouts used by hit testing stay current.
    fn resize(&mut self, _area: Rect) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    /// Whether the cell holds a control (button, input, link). Clicks on
    /// controls don't raise the hosting window.
    fn is_interactive(&self, _column: u16, _row: u16) -> bool {
        false
    }

    /// Best-effort hook run when the hosting window starts closing.
    fn before_close(&mut self) {}

    /// Advances component clocks. Returns whether a redraw is needed.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// Stops timers; the window finished closing.
    fn teardown(&mut self) {}
}

/// A component the desktop can host and later inspect by concrete type.
pub trait AppComponent: Component + std::fmt::Debug + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component + std::fmt::Debug + Any> AppComponent for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Content-relative position of a left-button press, if `event` is one.
pub(crate) fn left_click(event: &Event) -> Option<(u16, u16)> {
    match event {
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some((mouse.column, mouse.row))
        }
        _ => None,
    }
}
