use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded pump between an [`InputDriver`] and the desktop.
///
/// The handler sees `None` once per iteration (the idle tick used for
/// timers and drawing) and `Some(event)` for every input event.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs until the handler returns [`ControlFlow::Quit`] or the driver
    /// fails.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }

            if self.driver.poll(self.poll_interval)? {
                // drain bursts (drags) before the next redraw
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }
}
