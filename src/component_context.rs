//! Shared component context
//!
//! `ComponentContext` carries what an app component needs to know about its
//! host window while rendering or handling input: whether the window holds
//! focus and the current frame time, so components never read the clock
//! themselves.

use std::time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    now: Instant,
}

impl ComponentContext {
    pub const fn new(focused: bool, now: Instant) -> Self {
        Self { focused, now }
    }

    /// Whether the hosting window is focused.
    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// Time of the event or frame being processed.
    pub const fn now(&self) -> Instant {
        self.now
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false, Instant::now())
    }
}
