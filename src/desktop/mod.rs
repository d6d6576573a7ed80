//! Composition root of the terminal desktop: menu bar, windows, dock and
//! key bindings wired to a [`WindowManager`] keyed by [`AppKind`].
//!
//! Terminal layout, top to bottom: the menu bar row, the window area and
//! the dock row. Window geometry lives in geometry units; the desktop's
//! [`CellGrid`] maps the window area onto terminal cells with geometry
//! (0, 0) at the first cell below the menu bar.

pub mod dock;
pub mod menu_bar;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::apps::AppKind;
use crate::components::{AppComponent, ComponentContext};
use crate::config::DeskConfig;
use crate::constants::DEFAULT_TRANSITION;
use crate::error::DeskResult;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::{CellGrid, Size, visible_rect};
use crate::log_buffer::LogHandle;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::{AquaDecorator, WindowDecorator, content_rect};
use crate::window::{PointerEvent, PointerKind, PointerOutcome, WindowGeometry, WindowManager};
use dock::{Dock, DockState};
use menu_bar::MenuBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopOptions {
    /// Geometry units per terminal cell.
    pub cell: Size,
    pub transition: Duration,
}

impl Default for DesktopOptions {
    fn default() -> Self {
        Self {
            cell: Size::new(
                crate::constants::DEFAULT_CELL_WIDTH,
                crate::constants::DEFAULT_CELL_HEIGHT,
            ),
            transition: DEFAULT_TRANSITION,
        }
    }
}

impl From<&DeskConfig> for DesktopOptions {
    fn from(config: &DeskConfig) -> Self {
        Self {
            cell: config.cell,
            transition: config.transition,
        }
    }
}

#[derive(Debug)]
pub struct Desktop {
    windows: WindowManager<AppKind>,
    apps: BTreeMap<AppKind, Box<dyn AppComponent>>,
    decorator: AquaDecorator,
    dock: Dock,
    menu_bar: MenuBar,
    bindings: KeyBindings,
    log: Option<LogHandle>,
    area: Rect,
    cell: Size,
    quit: bool,
}

impl Desktop {
    pub fn new(options: DesktopOptions) -> DeskResult<Self> {
        let mut windows = WindowManager::new(Size::default());
        let mut apps = BTreeMap::new();
        for app in AppKind::ALL {
            windows.register(app, app.profile().with_transition(options.transition));
            apps.insert(app, app.create_component()?);
        }
        Ok(Self {
            windows,
            apps,
            decorator: AquaDecorator,
            dock: Dock::new(),
            menu_bar: MenuBar,
            bindings: KeyBindings::default(),
            log: None,
            area: Rect::default(),
            cell: options.cell,
            quit: false,
        })
    }

    /// Shows the last line of `log` in the menu bar.
    pub fn with_log(mut self, log: LogHandle) -> Self {
        self.log = Some(log);
        self
    }

    pub fn windows(&self) -> &WindowManager<AppKind> {
        &self.windows
    }

    pub fn grid(&self) -> CellGrid {
        self.windows.grid()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Concrete component hosted by `app`.
    pub fn app<T: 'static>(&self, app: AppKind) -> Option<&T> {
        self.apps
            .get(&app)
            .and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Adopts a new terminal size. Maximized windows follow the new viewport.
    pub fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        let grid = CellGrid::new((area.x, area.y.saturating_add(1)), self.cell);
        // the viewport stops above the dock row
        let rows = area.height.saturating_sub(2);
        self.windows.set_grid(grid);
        self.windows.set_viewport(grid.to_size(area.width, rows));
        self.dock.layout(Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: area.height.min(1),
        });
        tracing::debug!(width = area.width, height = area.height, "desktop resized");
    }

    pub fn launch(&mut self, app: AppKind, now: Instant) {
        self.windows.open(app, now);
    }

    /// Starts closing `app`'s window, giving its content a chance to save.
    pub fn close(&mut self, app: AppKind, now: Instant) -> bool {
        if !self.windows.request_close(app, now) {
            return false;
        }
        if let Some(component) = self.apps.get_mut(&app) {
            component.before_close();
        }
        true
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.resize(Rect::new(self.area.x, self.area.y, *width, *height));
                true
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if let Some(action) = self.bindings.action_for_key(key) {
            tracing::trace!(%action, "key action");
            self.apply(action, now);
            return true;
        }
        let Some(focused) = self.windows.focused() else {
            return false;
        };
        let ctx = ComponentContext::new(true, now);
        self.apps
            .get_mut(&focused)
            .is_some_and(|component| component.handle_event(&Event::Key(*key), &ctx))
    }

    fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.quit = true,
            Action::Launch(app) => self.launch(app, now),
            Action::CloseFocused => {
                if let Some(app) = self.windows.focused() {
                    self.close(app, now);
                }
            }
            Action::MinimizeFocused => {
                if let Some(app) = self.windows.focused() {
                    self.windows.request_minimize(app);
                }
            }
            Action::ToggleMaximizeFocused => {
                if let Some(app) = self.windows.focused() {
                    self.windows.request_toggle_maximize(app);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> bool {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            _ => return false,
        };
        if kind == PointerKind::Down && !self.windows.capture().is_active() {
            if let Some(app) = self.dock.hit(mouse.column, mouse.row) {
                self.launch(app, now);
                return true;
            }
            if mouse.row == self.area.y {
                // menu bar
                return true;
            }
        }

        self.layout_apps();
        let position = self.grid().to_point(mouse.column, mouse.row);
        let apps = &self.apps;
        let outcome = self.windows.handle_pointer(
            PointerEvent::new(kind, position),
            now,
            |app, column, row| {
                apps.get(&app)
                    .is_some_and(|component| component.is_interactive(column, row))
            },
        );
        match outcome {
            PointerOutcome::Ignored => false,
            PointerOutcome::Consumed => true,
            PointerOutcome::Closing(app) => {
                if let Some(component) = self.apps.get_mut(&app) {
                    component.before_close();
                }
                true
            }
            PointerOutcome::Content { id, column, row } => {
                let ctx = ComponentContext::new(self.windows.focused() == Some(id), now);
                let translated = Event::Mouse(MouseEvent {
                    column,
                    row,
                    ..*mouse
                });
                if let Some(component) = self.apps.get_mut(&id) {
                    component.handle_event(&translated, &ctx);
                }
                true
            }
        }
    }

    /// Content rectangle of a window in terminal cells.
    fn content_cells(&self, app: AppKind) -> Option<WindowGeometry> {
        self.windows.cell_rect(app).map(content_rect)
    }

    /// Hands every rendered component its current content size.
    fn layout_apps(&mut self) {
        for app in self.windows.draw_order() {
            let Some(content) = self.content_cells(app) else {
                continue;
            };
            if let Some(component) = self.apps.get_mut(&app) {
                component.resize(Rect::new(0, 0, content.width, content.height));
            }
        }
    }

    /// Advances window transitions and app clocks.
    pub fn tick(&mut self, now: Instant) {
        self.windows.tick(now);
        for app in self.windows.take_closed() {
            if let Some(component) = self.apps.get_mut(&app) {
                component.teardown();
            }
        }
        for component in self.apps.values_mut() {
            component.tick(now);
        }
    }

    /// Shuts the session down: pending closes finish, capture is released,
    /// and every app gets its teardown.
    pub fn teardown(&mut self) {
        self.windows.teardown();
        let closed = self.windows.take_closed();
        tracing::debug!(closed = closed.len(), "tearing down desktop");
        for component in self.apps.values_mut() {
            component.teardown();
        }
    }

    fn dock_state(&self, app: AppKind) -> DockState {
        match self.windows.window(app) {
            Some(window) if window.is_minimized() => DockState::Minimized,
            Some(window) if window.is_open() => DockState::Running,
            _ => DockState::Closed,
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let area = frame.area();
        if area != self.area {
            self.resize(area);
        }
        frame.fill(
            area,
            Style::default()
                .fg(theme::desktop_fg())
                .bg(theme::desktop_bg()),
        );

        let focused = self.windows.focused();
        for app in self.windows.draw_order() {
            let Some(window) = self.windows.window(app) else {
                continue;
            };
            let state = window.state();
            let Some(rect) = self.windows.cell_rect(app) else {
                continue;
            };
            if visible_rect(rect, area).is_empty() {
                continue;
            }
            let content = content_rect(rect);
            let is_focused = focused == Some(app);
            self.decorator
                .render_window(frame, rect, app.window_title(), is_focused, state);
            if content.width == 0 || content.height == 0 {
                continue;
            }
            let local = Rect::new(0, 0, content.width, content.height);
            let mut buffer = Buffer::empty(local);
            if let Some(component) = self.apps.get_mut(&app) {
                let mut offscreen = UiFrame::from_parts(local, &mut buffer);
                component.render(&mut offscreen, local, &ComponentContext::new(is_focused, now));
            }
            frame.blit_from_signed(&buffer, content);
        }

        self.dock.render(frame, |app| self.dock_state(app));
        let app_name = focused.map(AppKind::name).unwrap_or("Finder");
        let status = self.log.as_ref().and_then(LogHandle::last_line);
        self.menu_bar
            .render(frame, area, app_name, status.as_deref());
    }
}
