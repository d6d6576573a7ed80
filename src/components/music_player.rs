use std::time::Instant;

use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, left_click};
use crate::playback::{Playback, format_time};
use crate::theme;
use crate::ui::UiFrame;

const TRANSPORT_ROW: u16 = 0;
const PROGRESS_ROW: u16 = 1;
const VOLUME_ROW: u16 = 2;
const TRACK_HEADER_ROW: u16 = 3;
const FIRST_TRACK_ROW: u16 = 4;

const PREV_BUTTON: (u16, u16) = (1, 4);
const PLAY_BUTTON: (u16, u16) = (6, 9);
const NEXT_BUTTON: (u16, u16) = (11, 14);
const VOLUME_DOWN: (u16, u16) = (5, 7);
const VOLUME_UP: (u16, u16) = (14, 16);
const VOLUME_STEP: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Previous,
    PlayPause,
    Next,
    VolumeDown,
    VolumeUp,
    Track(usize),
}

/// Transport, progress line and playlist around a simulated [`Playback`].
#[derive(Debug)]
pub struct MusicPlayerComponent {
    playback: Playback,
    cursor: usize,
    area: Rect,
}

impl MusicPlayerComponent {
    pub fn new(playback: Playback) -> Self {
        Self {
            playback,
            cursor: 0,
            area: Rect::default(),
        }
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        let within = |range: (u16, u16)| column >= range.0 && column <= range.1;
        match row {
            TRANSPORT_ROW if within(PREV_BUTTON) => Some(Control::Previous),
            TRANSPORT_ROW if within(PLAY_BUTTON) => Some(Control::PlayPause),
            TRANSPORT_ROW if within(NEXT_BUTTON) => Some(Control::Next),
            VOLUME_ROW if within(VOLUME_DOWN) => Some(Control::VolumeDown),
            VOLUME_ROW if within(VOLUME_UP) => Some(Control::VolumeUp),
            row if row >= FIRST_TRACK_ROW && row < self.area.height => {
                let index = (row - FIRST_TRACK_ROW) as usize;
                (index < self.playback.tracks().len()).then_some(Control::Track(index))
            }
            _ => None,
        }
    }

    fn activate(&mut self, control: Control, now: Instant) {
        match control {
            Control::Previous => self.playback.previous(),
            Control::PlayPause => self.playback.toggle(now),
            Control::Next => self.playback.next(),
            Control::VolumeDown => self.playback.adjust_volume(-VOLUME_STEP),
            Control::VolumeUp => self.playback.adjust_volume(VOLUME_STEP),
            Control::Track(index) => {
                self.cursor = index;
                self.playback.select(index, now);
            }
        }
    }

    fn progress_bar(&self, width: usize) -> String {
        let filled = ((self.playback.progress() / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "━".repeat(filled), "─".repeat(width - filled))
    }
}

impl Component for MusicPlayerComponent {
    fn resize(&mut self, area: Rect) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.resize(area);
        let body = Style::default().fg(theme::body_fg()).bg(theme::body_bg());
        let button = body.fg(theme::accent()).add_modifier(Modifier::BOLD);
        let muted = body.fg(theme::muted_fg());
        frame.fill(area, body);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let x = area.x;
        let y = area.y;

        let play = if self.playback.is_playing() {
            "[||]"
        } else {
            "[> ]"
        };
        frame.set_string(x + PREV_BUTTON.0, y + TRANSPORT_ROW, "[<<]", button);
        frame.set_string(x + PLAY_BUTTON.0, y + TRANSPORT_ROW, play, button);
        frame.set_string(x + NEXT_BUTTON.0, y + TRANSPORT_ROW, "[>>]", button);
        let track = self.playback.current();
        frame.set_string(
            x + NEXT_BUTTON.1 + 3,
            y + TRANSPORT_ROW,
            &format!("{} - {}", track.title, track.artist),
            body.add_modifier(Modifier::BOLD),
        );

        let elapsed = format_time(self.playback.elapsed());
        let total = format_time(track.duration_secs);
        let bar_width = (area.width as usize).saturating_sub(elapsed.len() + total.len() + 4);
        frame.set_string(
            x + 1,
            y + PROGRESS_ROW,
            &format!("{elapsed} {} {total}", self.progress_bar(bar_width)),
            body,
        );

        frame.set_string(x + 1, y + VOLUME_ROW, "Vol", muted);
        frame.set_string(x + VOLUME_DOWN.0, y + VOLUME_ROW, "[-]", button);
        frame.set_string(
            x + VOLUME_DOWN.1 + 2,
            y + VOLUME_ROW,
            &format!("{:>3}%", self.playback.volume()),
            body,
        );
        frame.set_string(x + VOLUME_UP.0, y + VOLUME_ROW, "[+]", button);

        frame.set_string(
            x + 1,
            y + TRACK_HEADER_ROW,
            " #  Title",
            muted.add_modifier(Modifier::UNDERLINED),
        );
        let current = self.playback.current_index();
        for (idx, track) in self.playback.tracks().iter().enumerate() {
            let row = FIRST_TRACK_ROW + idx as u16;
            if row >= area.height {
                break;
            }
            let mut style = if idx == current {
                body.fg(theme::accent())
            } else {
                body
            };
            if idx == self.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let marker = if idx == current && self.playback.is_playing() {
                '♪'
            } else {
                ' '
            };
            let time = format_time(track.duration_secs);
            let line = format!("{marker}{:>2}  {}  {}", idx + 1, track.title, track.album);
            frame.set_string(x + 1, y + row, &line, style);
            let time_x = (area.width as usize).saturating_sub(time.len() + 1) as u16;
            if time_x > line.chars().count() as u16 + 1 {
                frame.set_string(x + time_x, y + row, &time, style);
            }
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        let now = ctx.now();
        if let Some((column, row)) = left_click(event) {
            return match self.control_at(column, row) {
                Some(control) => {
                    self.activate(control, now);
                    true
                }
                None => false,
            };
        }
        let Event::Key(key) = event else {
            return false;
        };
        let control = match key.code {
            KeyCode::Char(' ') => Control::PlayPause,
            KeyCode::Right | KeyCode::Char('n') => Control::Next,
            KeyCode::Left | KeyCode::Char('p') => Control::Previous,
            KeyCode::Char('+') | KeyCode::Char('=') => Control::VolumeUp,
            KeyCode::Char('-') => Control::VolumeDown,
            KeyCode::Enter => Control::Track(self.cursor),
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                return true;
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(self.playback.tracks().len() - 1);
                return true;
            }
            _ => return false,
        };
        self.activate(control, now);
        true
    }

    fn is_interactive(&self, column: u16, row: u16) -> bool {
        self.control_at(column, row).is_some()
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.playback.tick(now)
    }

    fn teardown(&mut self) {
        self.playback.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::Track;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::buffer::Buffer;
    use std::time::Duration;

    fn player() -> MusicPlayerComponent {
        let playback = Playback::new(vec![
            Track::new("Late Night Drive", "You", "Demos Vol. 1", 222),
            Track::new("Sunrise Memories", "You", "Demos Vol. 1", 255),
            Track::new("City Lights", "You", "Demos Vol. 1", 238),
        ])
        .unwrap();
        let mut p = MusicPlayerComponent::new(playback);
        p.resize(Rect::new(0, 0, 60, 12));
        p
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
    fn buttons_and_tracks_are_interactive() {
        let p = player();
        assert!(p.is_interactive(2, TRANSPORT_ROW));
        assert!(p.is_interactive(7, TRANSPORT_ROW));
        assert!(!p.is_interactive(5, TRANSPORT_ROW));
        assert!(p.is_interactive(15, VOLUME_ROW));
        assert!(!p.is_interactive(1, PROGRESS_ROW));
        assert!(p.is_interactive(10, FIRST_TRACK_ROW + 2));
        assert!(!p.is_interactive(10, FIRST_TRACK_ROW + 3));
    }

    #[test]
    fn clicking_a_track_plays_it() {
        let now = Instant::now();
        let ctx = ComponentContext::new(true, now);
        let mut p = player();
        assert!(p.handle_event(&click(3, FIRST_TRACK_ROW + 1), &ctx));
        assert_eq!(p.playback().current_index(), 1);
        assert!(p.playback().is_playing());
        assert!(p.tick(now + Duration::from_secs(1)));
        assert_eq!(p.playback().elapsed(), 1);
    }

    #[test]
    fn space_toggles_and_teardown_stops() {
        let now = Instant::now();
        let ctx = ComponentContext::new(true, now);
        let mut p = player();
        let space = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        p.handle_event(&space, &ctx);
        assert!(p.playback().is_playing());
        p.teardown();
        assert!(!p.playback().is_playing());
        assert!(!p.tick(now + Duration::from_secs(5)));
    }

    #[test]
    fn volume_buttons_step_by_ten() {
        let ctx = ComponentContext::default();
        let mut p = player();
        p.handle_event(&click(VOLUME_UP.0, VOLUME_ROW), &ctx);
        assert_eq!(p.playback().volume(), 80);
        p.handle_event(&click(VOLUME_DOWN.1, VOLUME_ROW), &ctx);
        p.handle_event(&click(VOLUME_DOWN.1, VOLUME_ROW), &ctx);
        assert_eq!(p.playback().volume(), 60);
    }

    #[test]
    fn renders_current_track_and_times() {
        let ctx = ComponentContext::default();
        let mut p = player();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        p.render(&mut frame, area, &ctx);
        let row = |y: u16| -> String {
            (0..60)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };
        assert!(row(TRANSPORT_ROW).contains("Late Night Drive - You"));
        assert!(row(PROGRESS_ROW).contains("0:00"));
        assert!(row(PROGRESS_ROW).contains("3:42"));
        assert!(row(FIRST_TRACK_ROW + 2).contains("City Lights"));
    }
}
