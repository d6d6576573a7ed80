use super::{Point, Size};
use crate::window::WindowGeometry;

/// One of the eight resize grips around a floating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Left,
        ResizeEdge::Right,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
    ];

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Resize in progress: the grip plus everything captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub edge: ResizeEdge,
    pub start: WindowGeometry,
    pub pointer_start: Point,
}

/// Move in progress: offset between the pointer and the window origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub offset: Point,
}

/// Window origin that keeps the recorded grab offset under the pointer.
pub fn apply_header_drag(drag: HeaderDrag, pointer: Point) -> Point {
    pointer - drag.offset
}

/// Geometry produced by dragging `drag.edge` to `pointer`.
///
/// Width and height never drop below `min`. Left/top grips move the origin
/// by the full pointer delta, so the opposite edge stays put only while the
/// minimum clamp is not engaged.
pub fn apply_resize_drag(drag: ResizeDrag, pointer: Point, min: Size) -> WindowGeometry {
    let delta = pointer - drag.pointer_start;
    let start = drag.start;
    let min_w = min.width.max(1) as i32;
    let min_h = min.height.max(1) as i32;
    let max_dim = u16::MAX as i32;

    let mut x = start.x;
    let mut y = start.y;
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if drag.edge.moves_right() {
        width = (width + delta.x).clamp(min_w, max_dim);
    }
    if drag.edge.moves_left() {
        width = (width - delta.x).clamp(min_w, max_dim);
        x = start.x + delta.x;
    }
    if drag.edge.moves_bottom() {
        height = (height + delta.y).clamp(min_h, max_dim);
    }
    if drag.edge.moves_top() {
        height = (height - delta.y).clamp(min_h, max_dim);
        y = start.y + delta.y;
    }

    WindowGeometry {
        x,
        y,
        width: width as u16,
        height: height as u16,
    }
}

/// Origin that centers `size` inside a viewport anchored at (0, 0).
///
/// Windows larger than the viewport get a negative origin, mirroring how
/// the content would overflow symmetrically.
pub fn centered_origin(size: Size, viewport: Size) -> Point {
    Point::new(
        (viewport.width as i32 - size.width as i32) / 2,
        (viewport.height as i32 - size.height as i32) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(x: i32, y: i32, width: u16, height: u16) -> WindowGeometry {
        WindowGeometry {
            x,
            y,
            width,
            height,
        }
    }

    fn resize(
        edge: ResizeEdge,
        start: WindowGeometry,
        from: (i32, i32),
        to: (i32, i32),
    ) -> WindowGeometry {
        let drag = ResizeDrag {
            edge,
            start,
            pointer_start: Point::new(from.0, from.1),
        };
        apply_resize_drag(drag, Point::new(to.0, to.1), Size::new(600, 500))
    }

    #[test]
    fn centered_in_full_hd() {
        let origin = centered_origin(Size::new(900, 550), Size::new(1920, 1080));
        assert_eq!(origin, Point::new(510, 265));
    }

    #[test]
    fn centered_overflow_goes_negative() {
        let origin = centered_origin(Size::new(900, 550), Size::new(800, 450));
        assert_eq!(origin, Point::new(-50, -50));
    }

    #[test]
    fn header_drag_subtracts_offset() {
        let drag = HeaderDrag {
            offset: Point::new(20, 20),
        };
        assert_eq!(
            apply_header_drag(drag, Point::new(300, 250)),
            Point::new(280, 230)
        );
    }

    #[test]
    fn bottom_right_grows_without_moving() {
        let res = resize(
            ResizeEdge::BottomRight,
            geom(100, 100, 900, 550),
            (1000, 650),
            (1050, 680),
        );
        assert_eq!(res, geom(100, 100, 950, 580));
    }

    #[test]
    fn top_left_grows_and_moves_origin() {
        let res = resize(
            ResizeEdge::TopLeft,
            geom(100, 100, 900, 550),
            (100, 100),
            (60, 80),
        );
        assert_eq!(res, geom(60, 80, 940, 570));
    }

    #[test]
    fn right_edge_clamps_to_minimum() {
        let res = resize(
            ResizeEdge::Right,
            geom(10, 10, 700, 550),
            (710, 300),
            (200, 300),
        );
        assert_eq!(res, geom(10, 10, 600, 550));
    }

    #[test]
    fn left_edge_keeps_right_edge_fixed() {
        let start = geom(100, 100, 900, 550);
        let res = resize(ResizeEdge::Left, start, (100, 300), (130, 300));
        assert_eq!(res.x, 130);
        assert_eq!(res.width, 870);
        assert_eq!(res.x + res.width as i32, start.x + start.width as i32);

    }

    #[test]
    fn clamped_left_edge_origin_follows_pointer() {
        let start = geom(100, 100, 900, 550);
        let clamped = resize(ResizeEdge::Left, start, (100, 300), (700, 300));
        assert_eq!(clamped.width, 600);
        assert_eq!(clamped.x, 700);
    }

    #[test]
    fn clamped_top_edge_origin_follows_pointer() {
        let start = geom(100, 100, 900, 550);
        let clamped = resize(ResizeEdge::Top, start, (400, 100), (400, 300));
        assert_eq!(clamped.height, 500);
        assert_eq!(clamped.y, 300);
    }

    #[test]
    fn top_edge_drag_down_shrinks() {
        let res = resize(
            ResizeEdge::Top,
            geom(0, 0, 800, 600),
            (400, 0),
            (400, 50),
        );
        assert_eq!(res, geom(0, 50, 800, 550));
    }

    #[test]
    fn zero_delta_is_identity() {
        let start = geom(-8, 12, 640, 520);
        for edge in ResizeEdge::ALL {
            assert_eq!(resize(edge, start, (5, 5), (5, 5)), start);
        }
    }

    #[test]
    fn horizontal_edges_ignore_vertical_motion() {
        let start = geom(0, 0, 800, 600);
        let res = resize(ResizeEdge::Right, start, (800, 300), (820, 900));
        assert_eq!(res.height, 600);
        assert_eq!(res.y, 0);
        assert_eq!(res.width, 820);
    }
}
