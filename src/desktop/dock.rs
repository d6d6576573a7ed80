use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::apps::AppKind;
use crate::layout::rect_contains;
use crate::theme;
use crate::ui::UiFrame;

/// Running state of an app as shown in the dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockState {
    Closed,
    Running,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DockSlot {
    app: AppKind,
    start: u16,
    width: u16,
}

/// Launcher strip centered on the bottom row.
#[derive(Debug, Default)]
pub struct Dock {
    slots: Vec<DockSlot>,
    area: Rect,
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    fn label(app: AppKind) -> String {
        format!(" {} {} ", app.icon(), app.name())
    }

    /// Recomputes slot positions for a dock row.
    pub fn layout(&mut self, area: Rect) {
        self.area = area;
        self.slots.clear();
        let widths: Vec<u16> = AppKind::ALL
            .iter()
            .map(|app| Self::label(*app).chars().count() as u16)
            .collect();
        let total: u16 = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        for (app, width) in AppKind::ALL.iter().zip(widths) {
            if x.saturating_add(width) > area.x.saturating_add(area.width) {
                break;
            }
            self.slots.push(DockSlot {
                app: *app,
                start: x,
                width,
            });
            x = x.saturating_add(width + 1);
        }
    }

    pub fn row(&self) -> Option<u16> {
        (self.area.height > 0).then_some(self.area.y)
    }

    /// App whose dock entry covers the given terminal cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<AppKind> {
        if self.row() != Some(row) {
            return None;
        }
        self.slots
            .iter()
            .find(|slot| rect_contains(Rect::new(slot.start, row, slot.width, 1), column, row))
            .map(|slot| slot.app)
    }

    pub fn render<F>(&self, frame: &mut UiFrame<'_>, state: F)
    where
        F: Fn(AppKind) -> DockState,
    {
        let Some(first) = self.slots.first() else {
            return;
        };
        let last = self.slots[self.slots.len() - 1];
        let strip = Rect {
            x: first.start.saturating_sub(1),
            y: self.area.y,
            width: (last.start + last.width + 1).saturating_sub(first.start.saturating_sub(1)),
            height: 1,
        };
        let base = Style::default().fg(theme::dock_fg()).bg(theme::dock_bg());
        frame.fill(strip, base);
        for slot in &self.slots {
            let style = match state(slot.app) {
                DockState::Closed => base,
                DockState::Running => base
                    .fg(theme::dock_running_fg())
                    .add_modifier(Modifier::BOLD),
                DockState::Minimized => base
                    .fg(theme::dock_running_fg())
                    .add_modifier(Modifier::DIM | Modifier::ITALIC),
            };
            frame.set_string(slot.start, self.area.y, &Self::label(slot.app), style);
        }
    }
}
