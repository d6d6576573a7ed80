use std::io;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::desktop::Desktop;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;

/// Drives `desktop` until it asks to quit. Input is routed as it arrives;
/// timers advance and the frame is redrawn on every idle tick. The desktop
/// is torn down once the loop ends. Mouse capture belongs to the output
/// driver that set up the terminal.
pub fn run_desktop<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);

    event_loop.run(|_, event| {
        let now = Instant::now();
        if let Some(event) = event {
            desktop.handle_event(&event, now);
            return Ok(if desktop.should_quit() {
                ControlFlow::Quit
            } else {
                ControlFlow::Continue
            });
        }
        desktop.tick(now);
        terminal
            .draw(|frame| {
                let mut frame = UiFrame::new(frame);
                desktop.render(&mut frame, now);
            })
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(ControlFlow::Continue)
    })?;

    desktop.teardown();
    tracing::info!("desktop closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppKind;
    use crate::desktop::DesktopOptions;
    use crate::drivers::ScriptedDriver;
    use crate::window::controller::WindowState;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    #[test]
    fn scripted_session_launches_and_quits() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut desktop = Desktop::new(DesktopOptions::default()).unwrap();
        let launch = KeyCode::F(AppKind::Music.launch_index() as u8 + 1);
        let driver = ScriptedDriver::new([
            Event::Key(KeyEvent::new(launch, KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        ]);
        run_desktop(&mut terminal, driver, &mut desktop, Duration::ZERO).unwrap();
        assert!(desktop.should_quit());
        assert_eq!(desktop.windows().focused(), Some(AppKind::Music));
    }

    #[test]
    fn quitting_mid_close_finishes_the_close() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut desktop = Desktop::new(DesktopOptions::default()).unwrap();
        let launch = KeyCode::F(AppKind::Notes.launch_index() as u8 + 1);
        let driver = ScriptedDriver::new([
            Event::Key(KeyEvent::new(launch, KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)),
        ]);
        run_desktop(&mut terminal, driver, &mut desktop, Duration::ZERO).unwrap();
        let notes = desktop.windows().window(AppKind::Notes).unwrap();
        assert_eq!(notes.state(), WindowState::Closed);
        assert!(!desktop.windows().capture().is_active());
    }
}
