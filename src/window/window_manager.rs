use std::collections::BTreeMap;
use std::time::Instant;

use super::controller::{FloatingWindow, WindowNotice};
use super::decorator::{ChromeHit, HeaderAction, hit_test};
use super::{WindowGeometry, WindowProfile};
use crate::constants::{DOUBLE_CLICK_WINDOW, FOCUSED_Z_INDEX};
use crate::layout::{CellGrid, Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer input in geometry units, relative to the desktop origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// What the manager did with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome<K> {
    /// Nothing under the pointer and no capture active.
    Ignored,
    /// Handled by the chrome or an active drag/resize.
    Consumed,
    /// Landed in a window's content area; coordinates are content-relative cells.
    Content { id: K, column: u16, row: u16 },
    /// The close button was pressed and the closing transition started.
    Closing(K),
}

/// Scope of a drag/resize interaction.
///
/// While a window owns the capture every move/up event is routed to it,
/// wherever the pointer is. The capture is released on pointer-up and
/// whenever its owner closes, minimizes, maximizes or is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerCapture<K> {
    owner: Option<K>,
}

impl<K> Default for PointerCapture<K> {
    fn default() -> Self {
        Self { owner: None }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> PointerCapture<K> {
    pub fn owner(&self) -> Option<K> {
        self.owner
    }

    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    pub fn acquire(&mut self, id: K) {
        tracing::trace!(window_id = ?id, "pointer captured");
        self.owner = Some(id);
    }

    pub fn release(&mut self) -> Option<K> {
        let owner = self.owner.take();
        if let Some(id) = owner {
            tracing::trace!(window_id = ?id, "pointer released");
        }
        owner
    }

    pub fn release_if(&mut self, id: K) -> bool {
        if self.owner == Some(id) {
            self.release();
            true
        } else {
            false
        }
    }
}

/// Owns every floating window, the focus token and the stacking order.
///
/// Windows are keyed by `K` (typically an app identifier). The manager knows
/// nothing about what a window shows; callers forward content clicks and run
/// their own save hooks based on the returned [`PointerOutcome`].
#[derive(Debug)]
pub struct WindowManager<K: Copy + Eq + Ord + std::fmt::Debug> {
    windows: BTreeMap<K, FloatingWindow>,
    focus: Option<K>,
    // raise order, last is most recently raised
    z_order: Vec<K>,
    capture: PointerCapture<K>,
    viewport: Size,
    grid: CellGrid,
    last_header_click: Option<(K, Instant)>,
    // queue of windows that finished closing; drained via `take_closed`
    closed: Vec<K>,
}

impl<K: Copy + Eq + Ord + std::fmt::Debug> WindowManager<K> {
    pub fn new(viewport: Size) -> Self {
        Self {
            windows: BTreeMap::new(),
            focus: None,
            z_order: Vec::new(),
            capture: PointerCapture::default(),
            viewport,
            grid: CellGrid::unit(),
            last_header_click: None,
            closed: Vec::new(),
        }
    }

    /// Grid used to hit-test window chrome. Chrome rows and columns are one
    /// cell thick.
    pub fn with_grid(mut self, grid: CellGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn set_grid(&mut self, grid: CellGrid) {
        self.grid = grid;
    }

    pub fn grid(&self) -> CellGrid {
        self.grid
    }

    pub fn register(&mut self, id: K, profile: WindowProfile) {
        self.windows
            .entry(id)
            .or_insert_with(|| FloatingWindow::new(profile));
    }

    pub fn ids(&self) -> Vec<K> {
        self.windows.keys().copied().collect()
    }

    pub fn window(&self, id: K) -> Option<&FloatingWindow> {
        self.windows.get(&id)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        for window in self.windows.values_mut() {
            window.fit_viewport(viewport);
        }
    }

    pub fn focused(&self) -> Option<K> {
        self.focus
    }

    pub fn capture(&self) -> PointerCapture<K> {
        self.capture
    }

    /// Stacking value for `id`: elevated while focused, the profile base otherwise.
    pub fn z_index(&self, id: K) -> i32 {
        if self.focus == Some(id) {
            return FOCUSED_Z_INDEX;
        }
        self.windows
            .get(&id)
            .map(|w| w.profile().base_z_index)
            .unwrap_or_default()
    }

    /// Rendered windows, bottom to top.
    pub fn draw_order(&self) -> Vec<K> {
        let mut ids: Vec<K> = self
            .windows
            .iter()
            .filter(|(_, w)| w.is_rendered())
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by_key(|id| {
            let raised = self
                .z_order
                .iter()
                .position(|x| x == id)
                .map(|p| p as i64)
                .unwrap_or(-1);
            (self.z_index(*id), raised)
        });
        ids
    }

    /// Windows that finished their closing transition since the last call.
    pub fn take_closed(&mut self) -> Vec<K> {
        std::mem::take(&mut self.closed)
    }

    /// Dock launch: opens a closed window, restores a minimized one, and
    /// focuses it either way.
    pub fn open(&mut self, id: K, now: Instant) -> bool {
        let viewport = self.viewport;
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        let changed = if window.is_minimized() {
            window.restore()
        } else {
            window.open(viewport, now)
        };
        if changed {
            tracing::debug!(window_id = ?id, "opened window");
        }
        self.drain(id);
        self.notify_focus(id);
        changed
    }

    pub fn request_close(&mut self, id: K, now: Instant) -> bool {
        self.capture.release_if(id);
        let started = self
            .windows
            .get_mut(&id)
            .is_some_and(|window| window.close(now));
        if started {
            tracing::debug!(window_id = ?id, "closing window");
        }
        self.drain(id);
        started
    }

    pub fn request_minimize(&mut self, id: K) -> bool {
        self.capture.release_if(id);
        let done = self
            .windows
            .get_mut(&id)
            .is_some_and(|window| window.minimize());
        self.drain(id);
        done
    }

    pub fn request_restore(&mut self, id: K) -> bool {
        let done = self
            .windows
            .get_mut(&id)
            .is_some_and(|window| window.restore());
        self.drain(id);
        done
    }

    pub fn request_toggle_maximize(&mut self, id: K) -> bool {
        self.capture.release_if(id);
        let viewport = self.viewport;
        let done = self
            .windows
            .get_mut(&id)
            .is_some_and(|window| window.toggle_maximize(viewport));
        if done {
            tracing::debug!(
                window_id = ?id,
                maximized = self.windows.get(&id).is_some_and(|w| w.is_maximized()),
                "toggled maximize"
            );
        }
        self.drain(id);
        done
    }

    pub fn notify_focus(&mut self, id: K) {
        if !self.windows.get(&id).is_some_and(|w| w.is_rendered()) {
            return;
        }
        if self.focus != Some(id) {
            tracing::debug!(window_id = ?id, "focus changed");
        }
        self.focus = Some(id);
        self.bring_to_front(id);
    }

    pub fn notify_minimize(&mut self, id: K) {
        tracing::debug!(window_id = ?id, "minimized window");
        self.capture.release_if(id);
        if self.focus == Some(id) {
            self.select_fallback_focus();
        }
    }

    pub fn notify_restore(&mut self, id: K) {
        tracing::debug!(window_id = ?id, "restored window");
        self.notify_focus(id);
    }

    pub fn notify_close(&mut self, id: K) {
        tracing::debug!(window_id = ?id, "closed window");
        self.capture.release_if(id);
        self.z_order.retain(|x| *x != id);
        if self.last_header_click.is_some_and(|(prev, _)| prev == id) {
            self.last_header_click = None;
        }
        if self.focus == Some(id) {
            self.select_fallback_focus();
        }
        self.closed.push(id);
    }

    /// Advances every window's transitions and applies the resulting notices.
    pub fn tick(&mut self, now: Instant) {
        let ids = self.ids();
        for id in ids {
            if let Some(window) = self.windows.get_mut(&id) {
                window.tick(now);
            }
            self.drain(id);
        }
    }

    /// Cancels timers and interactions on every window. Windows caught in
    /// their closing transition are closed on the spot.
    pub fn teardown(&mut self) {
        self.capture.release();
        let ids = self.ids();
        for id in ids {
            if let Some(window) = self.windows.get_mut(&id) {
                window.teardown();
            }
            self.drain(id);
        }
    }

    pub fn bring_to_front(&mut self, id: K) {
        if let Some(pos) = self.z_order.iter().position(|&x| x == id) {
            self.z_order.remove(pos);
        }
        self.z_order.push(id);
    }

    fn select_fallback_focus(&mut self) {
        let previous = self.focus.take();
        let candidate = self
            .draw_order()
            .into_iter()
            .rev()
            .find(|id| Some(*id) != previous && !self.is_closing(*id));
        if let Some(id) = candidate {
            self.focus = Some(id);
            self.bring_to_front(id);
        }
        tracing::debug!(from = ?previous, to = ?self.focus, "focus fallback");
    }

    fn is_closing(&self, id: K) -> bool {
        self.windows.get(&id).is_some_and(|w| w.is_closing())
    }

    fn drain(&mut self, id: K) {
        let notices = match self.windows.get_mut(&id) {
            Some(window) => window.take_notices(),
            None => return,
        };
        for notice in notices {
            match notice {
                WindowNotice::Focus => self.notify_focus(id),
                WindowNotice::Minimize => self.notify_minimize(id),
                WindowNotice::Restore => self.notify_restore(id),
                WindowNotice::Close => self.notify_close(id),
            }
        }
    }

    /// Cell rectangle of a window under the current grid.
    pub fn cell_rect(&self, id: K) -> Option<WindowGeometry> {
        self.windows
            .get(&id)
            .map(|w| self.grid.to_cells(w.geometry()))
    }

    /// Topmost rendered window under `point`, with what was hit.
    pub fn hit_test(&self, point: Point) -> Option<(K, ChromeHit)> {
        let (column, row) = self.grid.to_cell(point);
        self.draw_order().into_iter().rev().find_map(|id| {
            let rect = self.cell_rect(id)?;
            match hit_test(rect, column, row) {
                ChromeHit::Outside => None,
                hit => Some((id, hit)),
            }
        })
    }

    /// Routes a pointer event.
    ///
    /// `is_interactive(id, column, row)` reports whether a content cell holds
    /// an interactive control; clicks there don't raise the window.
    pub fn handle_pointer<F>(
        &mut self,
        event: PointerEvent,
        now: Instant,
        is_interactive: F,
    ) -> PointerOutcome<K>
    where
        F: Fn(K, u16, u16) -> bool,
    {
        match event.kind {
            PointerKind::Down => self.pointer_down(event.position, now, is_interactive),
            PointerKind::Move => {
                let Some(owner) = self.capture.owner() else {
                    return PointerOutcome::Ignored;
                };
                if let Some(window) = self.windows.get_mut(&owner) {
                    window.on_pointer_move(event.position);
                }
                PointerOutcome::Consumed
            }
            PointerKind::Up => {
                let Some(owner) = self.capture.release() else {
                    return PointerOutcome::Ignored;
                };
                if let Some(window) = self.windows.get_mut(&owner) {
                    window.end_interaction();
                }
                PointerOutcome::Consumed
            }
        }
    }

    fn pointer_down<F>(&mut self, position: Point, now: Instant, is_interactive: F) -> PointerOutcome<K>
    where
        F: Fn(K, u16, u16) -> bool,
    {
        // a stray down while captured (missed up event) ends the old interaction
        if let Some(owner) = self.capture.release()
            && let Some(window) = self.windows.get_mut(&owner)
        {
            window.end_interaction();
        }
        let Some((id, hit)) = self.hit_test(position) else {
            return PointerOutcome::Ignored;
        };
        match hit {
            ChromeHit::Outside => PointerOutcome::Ignored,
            ChromeHit::Button(HeaderAction::Close) => {
                self.last_header_click = None;
                if self.request_close(id, now) {
                    PointerOutcome::Closing(id)
                } else {
                    PointerOutcome::Consumed
                }
            }
            ChromeHit::Button(HeaderAction::Minimize) => {
                self.last_header_click = None;
                self.request_minimize(id);
                PointerOutcome::Consumed
            }
            ChromeHit::Button(HeaderAction::Maximize) => {
                self.last_header_click = None;
                self.request_toggle_maximize(id);
                PointerOutcome::Consumed
            }
            ChromeHit::Resize(edge) => {
                let started = self
                    .windows
                    .get_mut(&id)
                    .is_some_and(|window| window.begin_resize(edge, position));
                if started {
                    self.capture.acquire(id);
                }
                PointerOutcome::Consumed
            }
            ChromeHit::TitleBar => {
                if let Some(window) = self.windows.get_mut(&id) {
                    window.focus_click(false);
                }
                self.drain(id);
                if let Some((prev_id, prev)) = self.last_header_click
                    && prev_id == id
                    && now.saturating_duration_since(prev) <= DOUBLE_CLICK_WINDOW
                {
                    self.last_header_click = None;
                    self.request_toggle_maximize(id);
                    return PointerOutcome::Consumed;
                }
                self.last_header_click = Some((id, now));
                let started = self
                    .windows
                    .get_mut(&id)
                    .is_some_and(|window| window.begin_drag(position));
                if started {
                    self.capture.acquire(id);
                }
                PointerOutcome::Consumed
            }
            ChromeHit::Content { column, row } => {
                let interactive = is_interactive(id, column, row);
                if let Some(window) = self.windows.get_mut(&id) {
                    window.focus_click(interactive);
                }
                self.drain(id);
                PointerOutcome::Content { id, column, row }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::controller::WindowState;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum App {
        Finder,
        Notes,
        Music,
    }

    const VIEWPORT: Size = Size::new(1920, 1080);

    fn manager() -> WindowManager<App> {
        let mut wm = WindowManager::new(VIEWPORT);
        wm.register(
            App::Finder,
            WindowProfile::new(Size::new(900, 550), Size::new(600, 400), 20),
        );
        wm.register(
            App::Notes,
            WindowProfile::new(Size::new(800, 600), Size::new(600, 400), 25),
        );
        wm.register(
            App::Music,
            WindowProfile::new(Size::new(800, 520), Size::new(600, 400), 30),
        );
        wm
    }

    fn down(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerKind::Down, Point::new(x, y))
    }

    fn moved(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerKind::Move, Point::new(x, y))
    }

    fn up(x: i32, y: i32) -> PointerEvent {
        PointerEvent::new(PointerKind::Up, Point::new(x, y))
    }

    fn never(_: App, _: u16, _: u16) -> bool {
        false
    }

    #[test]
    fn open_focuses_and_elevates() {
        let now = Instant::now();
        let mut wm = manager();
        assert!(wm.open(App::Finder, now));
        assert_eq!(wm.focused(), Some(App::Finder));
        assert_eq!(wm.z_index(App::Finder), FOCUSED_Z_INDEX);
        assert_eq!(wm.z_index(App::Music), 30);
        wm.open(App::Notes, now);
        assert_eq!(wm.focused(), Some(App::Notes));
        assert_eq!(wm.z_index(App::Finder), 20);
        assert_eq!(wm.draw_order(), vec![App::Finder, App::Notes]);
    }

    #[test]
    fn minimize_moves_focus_to_next_topmost() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        wm.open(App::Notes, now);
        assert!(wm.request_minimize(App::Notes));
        assert_eq!(wm.focused(), Some(App::Finder));
        assert_eq!(wm.draw_order(), vec![App::Finder]);
        // dock click restores and focuses
        assert!(wm.open(App::Notes, now));
        assert_eq!(wm.focused(), Some(App::Notes));
        assert!(!wm.window(App::Notes).unwrap().is_minimized());
    }

    #[test]
    fn close_completes_on_tick_and_reports() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        assert!(wm.request_close(App::Finder, now));
        assert!(wm.take_closed().is_empty());
        wm.tick(now + Duration::from_millis(150));
        assert_eq!(wm.take_closed(), vec![App::Finder]);
        assert_eq!(wm.focused(), None);
        assert!(wm.draw_order().is_empty());
    }

    #[test]
    fn teardown_settles_closing_windows_and_releases_capture() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Notes, now);
        wm.open(App::Finder, now);
        wm.handle_pointer(down(600, 266), now, never);
        assert_eq!(wm.capture().owner(), Some(App::Finder));
        assert!(wm.request_close(App::Notes, now));

        wm.teardown();
        assert!(!wm.capture().is_active());
        assert_eq!(wm.take_closed(), vec![App::Notes]);
        assert_eq!(wm.window(App::Notes).unwrap().state(), WindowState::Closed);
        let finder = wm.window(App::Finder).unwrap();
        assert!(finder.is_open());
        assert!(!finder.is_interacting());
        assert_eq!(wm.focused(), Some(App::Finder));
    }

    #[test]
    fn title_bar_drag_moves_window_with_capture() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        // origin (510, 265); title bar is the second row
        let grab = Point::new(530, 266);
        assert_eq!(
            wm.handle_pointer(down(grab.x, grab.y), now, never),
            PointerOutcome::Consumed
        );
        assert_eq!(wm.capture().owner(), Some(App::Finder));
        // moves are routed even far outside the window
        wm.handle_pointer(moved(0, 0), now, never);
        wm.handle_pointer(moved(300, 250), now, never);
        assert_eq!(
            wm.handle_pointer(up(300, 250), now, never),
            PointerOutcome::Consumed
        );
        assert!(!wm.capture().is_active());
        let g = wm.window(App::Finder).unwrap().geometry();
        assert_eq!(g.origin(), Point::new(280, 249));
        assert_eq!(wm.handle_pointer(moved(10, 10), now, never), PointerOutcome::Ignored);
    }

    #[test]
    fn corner_resize_through_pointer() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        let g = wm.window(App::Finder).unwrap().geometry();
        let corner = Point::new(g.right() - 1, g.bottom() - 1);
        wm.handle_pointer(down(corner.x, corner.y), now, never);
        wm.handle_pointer(moved(corner.x + 50, corner.y + 30), now, never);
        wm.handle_pointer(up(corner.x + 50, corner.y + 30), now, never);
        let r = wm.window(App::Finder).unwrap().geometry();
        assert_eq!(r, WindowGeometry::new(510, 265, 950, 580));
    }

    #[test]
    fn double_click_title_toggles_maximize() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        wm.handle_pointer(down(600, 266), now, never);
        wm.handle_pointer(up(600, 266), now, never);
        wm.handle_pointer(down(600, 266), now + Duration::from_millis(200), never);
        assert!(wm.window(App::Finder).unwrap().is_maximized());
        assert!(!wm.capture().is_active());
    }

    #[test]
    fn close_button_reports_closing() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        // close light sits two cells right of the left border
        let out = wm.handle_pointer(down(512, 266), now, never);
        assert_eq!(out, PointerOutcome::Closing(App::Finder));
        assert!(wm.window(App::Finder).unwrap().is_closing());
    }

    #[test]
    fn interactive_content_click_keeps_focus() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        wm.open(App::Notes, now);
        // Finder content visible left of Notes (Notes spans x 560..1360)
        let out = wm.handle_pointer(down(520, 400), now, |_, _, _| true);
        assert!(matches!(out, PointerOutcome::Content { id: App::Finder, .. }));
        assert_eq!(wm.focused(), Some(App::Notes));
        let out = wm.handle_pointer(down(520, 400), now, never);
        assert!(matches!(out, PointerOutcome::Content { id: App::Finder, .. }));
        assert_eq!(wm.focused(), Some(App::Finder));
    }

    #[test]
    fn minimize_releases_active_capture() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        wm.handle_pointer(down(600, 266), now, never);
        assert!(wm.capture().is_active());
        wm.request_minimize(App::Finder);
        assert!(!wm.capture().is_active());
        assert!(!wm.window(App::Finder).unwrap().is_interacting());
    }

    #[test]
    fn maximize_persists_across_viewport_resize() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        wm.request_toggle_maximize(App::Finder);
        wm.set_viewport(Size::new(1280, 720));
        assert_eq!(
            wm.window(App::Finder).unwrap().geometry(),
            WindowGeometry::new(0, 0, 1280, 720)
        );
    }

    #[test]
    fn clicks_on_empty_desktop_are_ignored() {
        let now = Instant::now();
        let mut wm = manager();
        wm.open(App::Finder, now);
        assert_eq!(wm.handle_pointer(down(5, 5), now, never), PointerOutcome::Ignored);
    }
}
