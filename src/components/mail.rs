use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext, left_click};
use crate::constants::SUBSCRIBE_RESET;
use crate::theme;
use crate::timer::Timer;
use crate::ui::{UiFrame, truncate_to_width};

const HEADING: &str = "Stay Updated";
const TAGLINE: &str = "Subscribe to our newsletter for the latest updates";
const PLACEHOLDER: &str = "your.email@example.com";
const SUBSCRIBE: &str = "[ Subscribe ]";
const INPUT_ROW: u16 = 4;
const BUTTON_ROW: u16 = 6;
const PERKS_ROW: u16 = 9;

/// Newsletter signup: one address field and a subscribe button.
///
/// A successful submit shows a thank-you message that clears itself after
/// [`SUBSCRIBE_RESET`], leaving an empty form behind.
#[derive(Debug)]
pub struct MailComponent {
    perks: Vec<String>,
    email: String,
    submitted: bool,
    reset: Timer,
}

impl MailComponent {
    pub fn new(perks: Vec<String>) -> Self {
        Self {
            perks,
            email: String::new(),
            submitted: false,
            reset: Timer::idle(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if !self.submitted {
            self.email = email.into();
        }
    }

    /// Accepts the address if it looks like one. Ignored while the
    /// thank-you message is up.
    pub fn submit(&mut self, now: Instant) -> bool {
        if self.submitted || !looks_like_email(&self.email) {
            return false;
        }
        self.submitted = true;
        self.reset.once(now, SUBSCRIBE_RESET);
        tracing::info!(email = %self.email, "newsletter subscription");
        true
    }

    fn clear(&mut self) {
        self.email.clear();
        self.submitted = false;
    }

    fn button_span(&self) -> (u16, u16) {
        (1, SUBSCRIBE.chars().count() as u16)
    }
}

fn looks_like_email(text: &str) -> bool {
    let Some((local, domain)) = text.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

impl Component for MailComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let body = Style::default().fg(theme::body_fg()).bg(theme::body_bg());
        let muted = body.fg(theme::muted_fg());
        frame.fill(area, body);
        if area.width < 4 || area.height == 0 {
            return;
        }
        let x = area.x + 1;
        let y = area.y;
        let width = area.width.saturating_sub(2) as usize;
        let mut line = |row: u16, text: &str, style: Style| {
            if row < area.height {
                frame.set_string(x, y + row, &truncate_to_width(text, width), style);
            }
        };

        line(0, HEADING, body.add_modifier(Modifier::BOLD));
        line(1, TAGLINE, muted);
        if self.submitted {
            line(INPUT_ROW - 1, "Thank you for subscribing!", body.add_modifier(Modifier::BOLD));
            line(INPUT_ROW, "Check your email to confirm your subscription.", muted);
        } else {
            line(INPUT_ROW - 1, "Email Address", body);
            let field = if self.email.is_empty() {
                PLACEHOLDER
            } else {
                self.email.as_str()
            };
            let mut field_style = if self.email.is_empty() { muted } else { body };
            field_style = field_style.add_modifier(Modifier::UNDERLINED);
            let caret = if ctx.focused() { "▏" } else { "" };
            let inner = width.saturating_sub(4);
            line(
                INPUT_ROW,
                &format!("[ {:<inner$}{caret}", truncate_to_width(field, inner)),
                field_style,
            );
            line(
                BUTTON_ROW,
                SUBSCRIBE,
                body.fg(theme::accent()).add_modifier(Modifier::BOLD),
            );
            line(
                BUTTON_ROW + 1,
                "By subscribing, you agree to receive updates.",
                muted,
            );
        }
        line(PERKS_ROW, "What to expect:", body.add_modifier(Modifier::BOLD));
        for (idx, perk) in self.perks.iter().enumerate() {
            line(PERKS_ROW + 1 + idx as u16, &format!("  • {perk}"), muted);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Some((column, row)) = left_click(event) {
            return self.is_interactive(column, row)
                && (row == INPUT_ROW || self.submit(ctx.now()));
        }
        let Event::Key(key) = event else {
            return false;
        };
        if self.submitted || key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.email.push(c);
                true
            }
            KeyCode::Backspace => self.email.pop().is_some(),
            KeyCode::Enter => self.submit(ctx.now()),
            KeyCode::Esc => {
                self.email.clear();
                true
            }
            _ => false,
        }
    }

    fn is_interactive(&self, column: u16, row: u16) -> bool {
        if self.submitted {
            return false;
        }
        let (start, end) = self.button_span();
        row == INPUT_ROW || (row == BUTTON_ROW && column >= start && column <= end)
    }

    fn tick(&mut self, now: Instant) -> bool {
        if self.reset.poll(now) > 0 {
            self.clear();
            return true;
        }
        false
    }

    fn teardown(&mut self) {
        self.reset.cancel();
        self.clear();
    }
}
