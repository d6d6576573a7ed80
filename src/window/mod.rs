pub mod controller;
pub mod decorator;

mod window_manager;

use std::time::Duration;

use crate::constants::DEFAULT_TRANSITION;
use crate::layout::floating::centered_origin;
use crate::layout::{Point, Size};

/// Signed window origin with unsigned size, in geometry units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl WindowGeometry {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// `size` centered inside a viewport anchored at (0, 0).
    pub fn centered(size: Size, viewport: Size) -> Self {
        Self::from_parts(centered_origin(size, viewport), size)
    }

    /// Covers the whole viewport.
    pub fn filling(viewport: Size) -> Self {
        Self::new(0, 0, viewport.width, viewport.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, point: Point) -> bool {
        self.width > 0
            && self.height > 0
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }
}

/// Per-window-type sizing and stacking defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProfile {
    pub default_size: Size,
    pub min_size: Size,
    pub base_z_index: i32,
    pub transition: Duration,
}

impl WindowProfile {
    pub const fn new(default_size: Size, min_size: Size, base_z_index: i32) -> Self {
        Self {
            default_size,
            min_size,
            base_z_index,
            transition: DEFAULT_TRANSITION,
        }
    }

    pub const fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }
}

pub use controller::{FloatingWindow, WindowNotice, WindowState};
pub use window_manager::{PointerCapture, PointerEvent, PointerKind, PointerOutcome, WindowManager};
