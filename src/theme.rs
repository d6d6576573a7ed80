use ratatui::style::Color;

// Centralized theme colors. Kept as small helpers so call sites read like
// the role they paint rather than the literal color.

pub fn desktop_bg() -> Color {
    Color::Rgb(40, 30, 70)
}

pub fn desktop_fg() -> Color {
    Color::Rgb(150, 140, 180)
}

// Window chrome
pub fn header_bg(focused: bool) -> Color {
    if focused {
        Color::Rgb(90, 90, 100)
    } else {
        Color::Rgb(60, 60, 66)
    }
}

pub fn header_fg(focused: bool) -> Color {
    if focused { Color::White } else { Color::Gray }
}

pub fn border_fg(focused: bool) -> Color {
    if focused {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

pub fn body_bg() -> Color {
    Color::Rgb(28, 28, 32)
}

pub fn body_fg() -> Color {
    Color::Rgb(220, 220, 220)
}

pub fn muted_fg() -> Color {
    Color::Rgb(140, 140, 150)
}

pub fn close_light() -> Color {
    Color::Rgb(255, 95, 87)
}

pub fn minimize_light() -> Color {
    Color::Rgb(255, 189, 46)
}

pub fn maximize_light() -> Color {
    Color::Rgb(40, 201, 64)
}

// Menu bar / dock
pub fn menu_bg() -> Color {
    Color::Rgb(210, 210, 215)
}

pub fn menu_fg() -> Color {
    Color::Black
}

pub fn dock_bg() -> Color {
    Color::Rgb(70, 70, 90)
}

pub fn dock_fg() -> Color {
    Color::White
}

pub fn dock_running_fg() -> Color {
    Color::Rgb(255, 165, 0)
}

pub fn accent() -> Color {
    Color::Rgb(236, 72, 153)
}
