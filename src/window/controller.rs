//! Per-window state: geometry, lifecycle flags and the active pointer
//! interaction.
//!
//! A `FloatingWindow` never talks to its manager directly. Lifecycle edges
//! are queued as [`WindowNotice`]s which the owner drains with
//! [`FloatingWindow::take_notices`] after every operation or tick.

use std::time::Instant;

use super::{WindowGeometry, WindowProfile};
use crate::layout::floating::{
    HeaderDrag, ResizeDrag, ResizeEdge, apply_header_drag, apply_resize_drag,
};
use crate::layout::{Point, Size};
use crate::timer::Timer;

/// Observable state derived from the lifecycle flags and interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Closed,
    Opening,
    Idle,
    Dragging,
    Resizing,
    Maximized,
    Minimized,
    Closing,
}

/// Lifecycle edge reported to the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowNotice {
    Focus,
    Minimize,
    Restore,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interaction {
    Idle,
    Dragging(HeaderDrag),
    Resizing(ResizeDrag),
}

#[derive(Debug, Clone)]
pub struct FloatingWindow {
    profile: WindowProfile,
    geometry: WindowGeometry,
    saved: Option<WindowGeometry>,
    open: bool,
    minimized: bool,
    maximized: bool,
    closing: bool,
    interaction: Interaction,
    opening_timer: Timer,
    close_timer: Timer,
    notices: Vec<WindowNotice>,
}

impl FloatingWindow {
    pub fn new(profile: WindowProfile) -> Self {
        Self {
            profile,
            geometry: WindowGeometry::default(),
            saved: None,
            open: false,
            minimized: false,
            maximized: false,
            closing: false,
            interaction: Interaction::Idle,
            opening_timer: Timer::idle(),
            close_timer: Timer::idle(),
            notices: Vec::new(),
        }
    }

    pub fn profile(&self) -> &WindowProfile {
        &self.profile
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn saved_geometry(&self) -> Option<WindowGeometry> {
        self.saved
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Only open, non-minimized windows are drawn.
    pub fn is_rendered(&self) -> bool {
        self.open && !self.minimized
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction != Interaction::Idle
    }

    pub fn state(&self) -> WindowState {
        if !self.open {
            return WindowState::Closed;
        }
        if self.closing {
            return WindowState::Closing;
        }
        if self.minimized {
            return WindowState::Minimized;
        }
        match self.interaction {
            Interaction::Dragging(_) => return WindowState::Dragging,
            Interaction::Resizing(_) => return WindowState::Resizing,
            Interaction::Idle => {}
        }
        if self.maximized {
            WindowState::Maximized
        } else if self.opening_timer.is_armed() {
            WindowState::Opening
        } else {
            WindowState::Idle
        }
    }

    pub fn take_notices(&mut self) -> Vec<WindowNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Opens the window centered in `viewport` with its default size.
    ///
    /// Returns `false` when the window was already open. Opening a window
    /// that is still playing its closing transition cancels the close and
    /// keeps the current geometry.
    pub fn open(&mut self, viewport: Size, now: Instant) -> bool {
        if self.open && !self.closing {
            return false;
        }
        if self.closing {
            self.closing = false;
            self.close_timer.cancel();
            tracing::debug!("close cancelled by reopen");
            return true;
        }
        self.geometry = WindowGeometry::centered(self.profile.default_size, viewport);
        self.saved = None;
        self.open = true;
        self.minimized = false;
        self.maximized = false;
        self.interaction = Interaction::Idle;
        self.opening_timer.once(now, self.profile.transition);
        true
    }

    fn accepts_pointer(&self) -> bool {
        self.open && !self.minimized && !self.maximized && !self.closing
    }

    /// Starts moving the window. No-op while maximized, minimized or closing.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        if !self.accepts_pointer() {
            return false;
        }
        self.interaction = Interaction::Dragging(HeaderDrag {
            offset: pointer - self.geometry.origin(),
        });
        true
    }

    /// Starts resizing from `edge`. No-op while maximized, minimized or closing.
    pub fn begin_resize(&mut self, edge: ResizeEdge, pointer: Point) -> bool {
        if !self.accepts_pointer() {
            return false;
        }
        self.interaction = Interaction::Resizing(ResizeDrag {
            edge,
            start: self.geometry,
            pointer_start: pointer,
        });
        true
    }

    /// Applies pointer motion to the active interaction. Returns whether the
    /// geometry changed.
    pub fn on_pointer_move(&mut self, pointer: Point) -> bool {
        let next = match self.interaction {
            Interaction::Idle => return false,
            Interaction::Dragging(drag) => {
                let mut next = self.geometry;
                next.set_origin(apply_header_drag(drag, pointer));
                next
            }
            Interaction::Resizing(drag) => {
                apply_resize_drag(drag, pointer, self.profile.min_size)
            }
        };
        if next == self.geometry {
            return false;
        }
        self.geometry = next;
        true
    }

    pub fn end_drag(&mut self) {
        if matches!(self.interaction, Interaction::Dragging(_)) {
            self.interaction = Interaction::Idle;
        }
    }

    pub fn end_resize(&mut self) {
        if matches!(self.interaction, Interaction::Resizing(_)) {
            self.interaction = Interaction::Idle;
        }
    }

    /// Ends whichever interaction is active.
    pub fn end_interaction(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Maximizes into `viewport`, or restores the geometry saved before the
    /// last maximize.
    pub fn toggle_maximize(&mut self, viewport: Size) -> bool {
        if !self.open || self.closing {
            return false;
        }
        self.interaction = Interaction::Idle;
        if self.maximized {
            if let Some(saved) = self.saved.take() {
                self.geometry = saved;
            }
            self.maximized = false;
        } else {
            self.saved = Some(self.geometry);
            self.geometry = WindowGeometry::filling(viewport);
            self.maximized = true;
        }
        true
    }

    /// Re-fits a maximized window after the viewport changed size.
    pub fn fit_viewport(&mut self, viewport: Size) {
        if self.open && self.maximized {
            self.geometry = WindowGeometry::filling(viewport);
        }
    }

    pub fn minimize(&mut self) -> bool {
        if !self.open || self.minimized || self.closing {
            return false;
        }
        self.interaction = Interaction::Idle;
        self.minimized = true;
        self.notices.push(WindowNotice::Minimize);
        true
    }

    pub fn restore(&mut self) -> bool {
        if !self.open || !self.minimized {
            return false;
        }
        self.minimized = false;
        self.notices.push(WindowNotice::Restore);
        true
    }

    /// Starts the closing transition. The window closes for real on the
    /// first [`tick`](Self::tick) after the profile's transition delay.
    pub fn close(&mut self, now: Instant) -> bool {
        if !self.open || self.closing {
            return false;
        }
        self.interaction = Interaction::Idle;
        self.opening_timer.cancel();
        self.closing = true;
        self.close_timer.once(now, self.profile.transition);
        true
    }

    /// Click inside the window body. Clicks on interactive controls leave
    /// focus alone so they don't steal it mid-interaction.
    pub fn focus_click(&mut self, interactive: bool) -> bool {
        if interactive || !self.is_rendered() || self.closing {
            return false;
        }
        self.notices.push(WindowNotice::Focus);
        true
    }

    /// Advances the opening/closing transitions.
    pub fn tick(&mut self, now: Instant) {
        if self.opening_timer.poll(now) > 0 {
            tracing::trace!("opening transition finished");
        }
        if self.close_timer.poll(now) > 0 {
            self.finish_close();
        }
    }

    fn finish_close(&mut self) {
        self.open = false;
        self.closing = false;
        self.maximized = false;
        self.minimized = false;
        self.saved = None;
        self.interaction = Interaction::Idle;
        self.notices.push(WindowNotice::Close);
    }

    /// Drops timers and interaction state. A pending close is finished
    /// immediately rather than left hanging.
    pub fn teardown(&mut self) {
        self.opening_timer.cancel();
        self.close_timer.cancel();
        self.interaction = Interaction::Idle;
        if self.closing {
            self.finish_close();
        }
    }
}
