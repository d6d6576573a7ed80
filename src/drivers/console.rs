use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::InputDriver;
use super::keyboard::KeyboardNormalizer;

/// Reads crossterm events from the controlling terminal.
#[derive(Debug, Default)]
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
    pending: VecDeque<Event>,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_normalized(&mut self) -> io::Result<Event> {
        loop {
            let event = crossterm::event::read()?;
            if let Some(event) = self.normalizer.normalize(event) {
                return Ok(event);
            }
        }
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        // a poll hit may be a dropped key release; keep it queued so the
        // following read never blocks
        if crossterm::event::poll(timeout)?
            && let Some(event) = self.normalizer.normalize(crossterm::event::read()?)
        {
            self.pending.push_back(event);
            return Ok(true);
        }
        Ok(false)
    }

    fn read(&mut self) -> io::Result<Event> {
        match self.pending.pop_front() {
            Some(event) => Ok(event),
            None => self.read_normalized(),
        }
    }
}

/// Owns the terminal while the desktop runs: alternate screen, raw mode
/// and mouse capture on entry, all undone on exit or drop. Nothing else
/// toggles mouse capture.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
