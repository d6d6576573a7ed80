use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use term_desk::apps::AppKind;
use term_desk::desktop::{Desktop, DesktopOptions};
use term_desk::ui::UiFrame;

/// Frames spent on one gesture: press, drag out and back, release.
const GESTURE_FRAMES: u64 = 40;
/// Farthest the pointer strays from where it was pressed, in cells.
const GESTURE_REACH: i32 = 12;

#[derive(Parser, Debug)]
#[command(
    name = "desk-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replays window drags and resizes headlessly and reports frame timings"
)]
struct BenchCli {
    /// Number of frames to render.
    #[arg(short = 'n', long = "frames", value_name = "FRAMES", default_value_t = 2_000)]
    frames: u64,

    /// Virtual terminal width in columns.
    #[arg(long, value_name = "COLS", default_value_t = 192)]
    width: u16,

    /// Virtual terminal height in rows.
    #[arg(long, value_name = "ROWS", default_value_t = 56)]
    height: u16,
}

struct BenchConfig {
    frames: u64,
    width: u16,
    height: u16,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=1_000_000).contains(&cli.frames) {
            return Err("frames must be between 1 and 1000000".to_string());
        }
        if !(40..=1000).contains(&cli.width) || !(12..=500).contains(&cli.height) {
            return Err("terminal must be between 40x12 and 1000x500".to_string());
        }
        Ok(Self {
            frames: cli.frames,
            width: cli.width,
            height: cli.height,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Drag,
    Resize,
}

impl Gesture {
    fn for_cycle(cycle: u64) -> Self {
        if cycle % 2 == 0 {
            Gesture::Drag
        } else {
            Gesture::Resize
        }
    }
}

fn mouse(kind: MouseEventKind, column: i32, row: i32) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column: column.clamp(0, u16::MAX as i32) as u16,
        row: row.clamp(0, u16::MAX as i32) as u16,
        modifiers: KeyModifiers::NONE,
    })
}

/// Grab point for a gesture on the focused window: the title bar middle for
/// drags, the bottom-right grip for resizes.
fn anchor(desk: &Desktop, app: AppKind, gesture: Gesture) -> Option<(i32, i32)> {
    let rect = desk.windows().cell_rect(app)?;
    Some(match gesture {
        Gesture::Drag => (rect.x + rect.width as i32 / 2, rect.y + 1),
        Gesture::Resize => (rect.right() - 1, rect.bottom() - 1),
    })
}

/// Pointer offset for a frame inside a gesture: out along a diagonal and
/// back again.
fn offset(phase: u64) -> i32 {
    let half = GESTURE_FRAMES / 2;
    let step = if phase <= half { phase } else { GESTURE_FRAMES - phase };
    (step as i32 * GESTURE_REACH) / half as i32
}

fn run_benchmark(config: &BenchConfig) -> io::Result<BenchStats> {
    let mut terminal = Terminal::new(TestBackend::new(config.width, config.height))
        .map_err(|err| io::Error::other(err.to_string()))?;
    let mut desk = Desktop::new(DesktopOptions::default()).map_err(io::Error::other)?;
    let start = Instant::now();
    desk.resize(ratatui::layout::Rect::new(0, 0, config.width, config.height));
    // last launched ends up focused and on top
    for app in AppKind::ALL {
        desk.launch(app, start);
    }
    let target = AppKind::ALL[AppKind::ALL.len() - 1];

    let mut stats = BenchStats::new();
    let mut grab = None;
    for frame_no in 0..config.frames {
        let now = start + Duration::from_millis(frame_no * 16);
        let cycle = frame_no / GESTURE_FRAMES;
        let phase = frame_no % GESTURE_FRAMES;
        let gesture = Gesture::for_cycle(cycle);

        let event_start = Instant::now();
        if phase == 0 {
            grab = anchor(&desk, target, gesture);
            if let Some((x, y)) = grab {
                desk.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
            }
        } else if let Some((x, y)) = grab {
            let d = offset(phase);
            let kind = if phase == GESTURE_FRAMES - 1 {
                MouseEventKind::Up(MouseButton::Left)
            } else {
                MouseEventKind::Drag(MouseButton::Left)
            };
            desk.handle_event(&mouse(kind, x + d, y + d), now);
            stats.pointer_events += 1;
        }
        desk.tick(now);
        let event_time = event_start.elapsed();

        let draw_start = Instant::now();
        terminal
            .draw(|frame| {
                let mut frame = UiFrame::new(frame);
                desk.render(&mut frame, now);
            })
            .map_err(|err| io::Error::other(err.to_string()))?;
        stats.record_frame(event_time, draw_start.elapsed());
    }

    stats.final_geometry = desk
        .windows()
        .window(target)
        .map(|w| {
            let g = w.geometry();
            format!("{}x{} at ({}, {})", g.width, g.height, g.x, g.y)
        })
        .unwrap_or_default();
    stats.mark_completed();
    Ok(stats)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    pointer_events: u64,
    total_event_time: Duration,
    total_draw_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
    final_geometry: String,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            pointer_events: 0,
            total_event_time: Duration::ZERO,
            total_draw_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
            final_geometry: String::new(),
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, event_time: Duration, draw_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_event_time += event_time;
        self.total_draw_time += draw_time;
        let frame_time = event_time + draw_time;
        self.fastest_frame = self.fastest_frame.min(frame_time);
        self.slowest_frame = self.slowest_frame.max(frame_time);
    }

    fn average_ms(&self, total: Duration) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (total.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };
        let (best, worst) = if self.frame_count == 0 {
            (0.0, 0.0)
        } else {
            (
                self.fastest_frame.as_secs_f64() * 1_000.0,
                self.slowest_frame.as_secs_f64() * 1_000.0,
            )
        };

        indoc::formatdoc!(
            r#"
            Desk bench on a {width}x{height} terminal.
            Frames: {frames} in {elapsed:.2}s ({fps:.1} fps unthrottled)
            Pointer events: {events}
            Avg input: {input:.3} ms | Avg draw: {draw:.3} ms
            Frame best: {best:.3} ms | worst: {worst:.3} ms
            Final window: {geometry}
            "#,
            width = config.width,
            height = config.height,
            frames = self.frame_count,
            elapsed = elapsed,
            fps = fps,
            events = self.pointer_events,
            input = self.average_ms(self.total_event_time),
            draw = self.average_ms(self.total_draw_time),
            best = best,
            worst = worst,
            geometry = self.final_geometry,
        )
    }
}
