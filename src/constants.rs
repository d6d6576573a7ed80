//! Shared crate-wide constants.

use std::time::Duration;

/// Delay between a close request and the window actually closing. The
/// chrome renders a closing state in between.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(150);

/// Z-index handed to whichever window currently holds focus. Sits above
/// every per-app base value; the dock is always drawn above windows.
pub const FOCUSED_Z_INDEX: i32 = 35;

/// Two title-bar presses within this window toggle maximize.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Geometry units covered by one terminal column / row unless overridden
/// on the command line.
pub const DEFAULT_CELL_WIDTH: u16 = 10;
pub const DEFAULT_CELL_HEIGHT: u16 = 20;

/// Interval of the simulated playback clock.
pub const PLAYBACK_TICK: Duration = Duration::from_secs(1);

/// How long the newsletter form shows its thank-you message before it
/// resets for another address.
pub const SUBSCRIBE_RESET: Duration = Duration::from_secs(3);
