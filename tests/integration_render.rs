use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use term_desk::apps::AppKind;
use term_desk::desktop::{Desktop, DesktopOptions};
use term_desk::log_buffer::LogHandle;
use term_desk::ui::UiFrame;

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer.cell((x, row)).map_or(" ", |c| c.symbol()).to_string())
        .collect()
}

fn draw(terminal: &mut Terminal<TestBackend>, desk: &mut Desktop, now: Instant) {
    terminal
        .draw(|frame| {
            let mut frame = UiFrame::new(frame);
            desk.render(&mut frame, now);
        })
        .unwrap();
}

#[test]
fn empty_desktop_shows_menu_bar_and_dock() {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    let mut desk = Desktop::new(DesktopOptions::default()).unwrap();
    draw(&mut terminal, &mut desk, Instant::now());
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 0).contains("Finder  File"));
    let dock = row_text(buffer, 29);
    for app in AppKind::ALL {
        assert!(dock.contains(app.name()), "dock is missing {}", app.name());
    }
}

#[test]
fn focused_window_title_and_content_are_drawn() {
    let now = Instant::now();
    let mut terminal = Terminal::new(TestBackend::new(192, 56)).unwrap();
    let mut desk = Desktop::new(DesktopOptions::default()).unwrap();
    draw(&mut terminal, &mut desk, now);
    desk.launch(AppKind::Music, now);
    draw(&mut terminal, &mut desk, now);

    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 0).contains("iTunes  File"));
    // Music chrome: top border on row 15, title bar on row 16
    assert!(row_text(buffer, 16).contains(AppKind::Music.window_title()));
    let body: String = (17..40).map(|row| row_text(buffer, row)).collect();
    assert!(body.contains("Late Night Drive"));
}

#[test]
fn windows_hanging_off_screen_are_clipped() {
    let now = Instant::now();
    // smaller than Finder's default size, so it opens with a negative origin
    let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
    let mut desk = Desktop::new(DesktopOptions::default()).unwrap();
    draw(&mut terminal, &mut desk, now);
    desk.launch(AppKind::Finder, now);
    assert!(desk.windows().window(AppKind::Finder).unwrap().geometry().x < 0);
    draw(&mut terminal, &mut desk, now);
}

#[test]
fn menu_bar_shows_latest_log_line() {
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    let log = LogHandle::new(16);
    log.push("Finder ready");
    let mut desk = Desktop::new(DesktopOptions::default())
        .unwrap()
        .with_log(log);
    draw(&mut terminal, &mut desk, Instant::now());
    let menu = row_text(terminal.backend().buffer(), 0);
    assert!(menu.trim_end().ends_with("Finder ready"));
}

#[test]
fn closing_window_is_drawn_until_transition_ends() {
    let now = Instant::now();
    let mut terminal = Terminal::new(TestBackend::new(192, 56)).unwrap();
    let mut desk = Desktop::new(DesktopOptions::default()).unwrap();
    draw(&mut terminal, &mut desk, now);
    desk.launch(AppKind::Mail, now);
    desk.close(AppKind::Mail, now);
    draw(&mut terminal, &mut desk, now);
    let title = AppKind::Mail.window_title();
    let visible = |buffer: &Buffer| (0..56).any(|row| row_text(buffer, row).contains(title));
    assert!(visible(terminal.backend().buffer()));

    desk.tick(now + Duration::from_millis(150));
    draw(&mut terminal, &mut desk, now);
    assert!(!visible(terminal.backend().buffer()));
}
