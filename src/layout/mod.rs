pub mod floating;

use ratatui::prelude::Rect;
use std::ops::{Add, Sub};

use crate::window::WindowGeometry;

/// A position in geometry units. Signed so windows can hang off the
/// top/left edge of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Projection between terminal cells and geometry units.
///
/// Window geometry lives in abstract units ("pixels"); every terminal cell
/// covers `cell.width` x `cell.height` of them. `origin` is the terminal
/// cell that maps to geometry point (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    pub origin: (u16, u16),
    pub cell: Size,
}

impl Default for CellGrid {
    fn default() -> Self {
        Self::unit()
    }
}

impl CellGrid {
    pub const fn new(origin: (u16, u16), cell: Size) -> Self {
        Self { origin, cell }
    }

    /// One geometry unit per cell, anchored at the terminal origin.
    pub const fn unit() -> Self {
        Self {
            origin: (0, 0),
            cell: Size::new(1, 1),
        }
    }

    fn cell_w(&self) -> i32 {
        self.cell.width.max(1) as i32
    }

    fn cell_h(&self) -> i32 {
        self.cell.height.max(1) as i32
    }

    /// Geometry point at the top-left corner of a terminal cell.
    pub fn to_point(&self, column: u16, row: u16) -> Point {
        let col = column as i32 - self.origin.0 as i32;
        let row = row as i32 - self.origin.1 as i32;
        Point::new(col * self.cell_w(), row * self.cell_h())
    }

    /// Terminal cell (signed) containing a geometry point.
    pub fn to_cell(&self, point: Point) -> (i32, i32) {
        (
            point.x.div_euclid(self.cell_w()) + self.origin.0 as i32,
            point.y.div_euclid(self.cell_h()) + self.origin.1 as i32,
        )
    }

    /// Geometry size covered by `columns` x `rows` cells, saturating at `u16::MAX`.
    pub fn to_size(&self, columns: u16, rows: u16) -> Size {
        let w = (columns as i32 * self.cell_w()).min(u16::MAX as i32);
        let h = (rows as i32 * self.cell_h()).min(u16::MAX as i32);
        Size::new(w as u16, h as u16)
    }

    /// Signed cell rectangle occupied by a window. Edges are floored to the
    /// grid so adjacent windows never share a half cell.
    pub fn to_cells(&self, geometry: WindowGeometry) -> WindowGeometry {
        let cw = self.cell_w();
        let ch = self.cell_h();
        let left = geometry.x.div_euclid(cw);
        let top = geometry.y.div_euclid(ch);
        let right = (geometry.x + geometry.width as i32).div_euclid(cw);
        let bottom = (geometry.y + geometry.height as i32).div_euclid(ch);
        WindowGeometry {
            x: left + self.origin.0 as i32,
            y: top + self.origin.1 as i32,
            width: (right - left).clamp(1, u16::MAX as i32) as u16,
            height: (bottom - top).clamp(1, u16::MAX as i32) as u16,
        }
    }
}

/// Clip a signed cell rectangle against unsigned terminal bounds.
pub fn visible_rect(rect: WindowGeometry, bounds: Rect) -> Rect {
    let left = rect.x.max(bounds.x as i32);
    let top = rect.y.max(bounds.y as i32);
    let right = (rect.x + rect.width as i32).min(bounds.x as i32 + bounds.width as i32);
    let bottom = (rect.y + rect.height as i32).min(bounds.y as i32 + bounds.height as i32);
    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}
