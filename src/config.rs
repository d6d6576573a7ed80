//! Command-line options and their validated form.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use thiserror::Error;
use tracing::Level;

use crate::apps::AppKind;
use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_TRANSITION};
use crate::layout::Size;

const KEYS_HELP: &str = indoc! {"
    Keys:
      F1-F6     launch or restore an app (dock order)
      F7        minimize the focused window
      F8        maximize / restore the focused window
      Ctrl+W    close the focused window
      Ctrl+Q    quit
    Drag a title bar to move a window, drag its border to resize it.
"};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop shell with floating windows, rendered in the terminal",
    after_help = KEYS_HELP
)]
pub struct DeskCli {
    /// Geometry units covered by one terminal column.
    #[arg(long, value_name = "UNITS", default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: u16,

    /// Geometry units covered by one terminal row.
    #[arg(long, value_name = "UNITS", default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: u16,

    /// Input poll interval; also the redraw cadence while idle.
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub frame_ms: u64,

    /// Delay between a close request and the window disappearing.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TRANSITION.as_millis() as u64)]
    pub transition_ms: u64,

    /// Maximum log level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of the in-memory buffer.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Apps to open at startup. Repeatable.
    #[arg(long = "open", value_enum, value_name = "APP")]
    pub open: Vec<AppKind>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell width must be between 1 and 64 (got {0})")]
    CellWidth(u16),
    #[error("cell height must be between 1 and 64 (got {0})")]
    CellHeight(u16),
    #[error("frame interval must be between 1 and 1000 ms (got {0})")]
    FrameInterval(u64),
    #[error("transition must be at most 5000 ms (got {0})")]
    Transition(u64),
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub cell: Size,
    pub frame_interval: Duration,
    pub transition: Duration,
    pub log_level: Level,
    pub log_file: Option<PathBuf>,
    pub open: Vec<AppKind>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            cell: Size::new(DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT),
            frame_interval: Duration::from_millis(16),
            transition: DEFAULT_TRANSITION,
            log_level: Level::INFO,
            log_file: None,
            open: Vec::new(),
        }
    }
}

impl TryFrom<&DeskCli> for DeskConfig {
    type Error = ConfigError;

    fn try_from(cli: &DeskCli) -> Result<Self, Self::Error> {
        if !(1..=64).contains(&cli.cell_width) {
            return Err(ConfigError::CellWidth(cli.cell_width));
        }
        if !(1..=64).contains(&cli.cell_height) {
            return Err(ConfigError::CellHeight(cli.cell_height));
        }
        if !(1..=1000).contains(&cli.frame_ms) {
            return Err(ConfigError::FrameInterval(cli.frame_ms));
        }
        if cli.transition_ms > 5000 {
            return Err(ConfigError::Transition(cli.transition_ms));
        }
        let log_level = cli
            .log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;
        let mut open = Vec::new();
        for app in &cli.open {
            if !open.contains(app) {
                open.push(*app);
            }
        }
        Ok(Self {
            cell: Size::new(cli.cell_width, cli.cell_height),
            frame_interval: Duration::from_millis(cli.frame_ms),
            transition: Duration::from_millis(cli.transition_ms),
            log_level,
            log_file: cli.log_file.clone(),
            open,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> DeskCli {
        DeskCli::try_parse_from(std::iter::once("term-desk").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_validate() {
        let config = DeskConfig::try_from(&parse(&[])).unwrap();
        assert_eq!(config, DeskConfig::default());
    }

    #[test]
    fn open_is_repeatable_and_deduplicated() {
        let cli = parse(&["--open", "music", "--open", "notes", "--open", "music"]);
        let config = DeskConfig::try_from(&cli).unwrap();
        assert_eq!(config.open, vec![AppKind::Music, AppKind::Notes]);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = DeskConfig::try_from(&parse(&["--cell-width", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::CellWidth(0));
        let err = DeskConfig::try_from(&parse(&["--frame-ms", "5000"])).unwrap_err();
        assert_eq!(err, ConfigError::FrameInterval(5000));
        let err = DeskConfig::try_from(&parse(&["--transition-ms", "9000"])).unwrap_err();
        assert_eq!(err, ConfigError::Transition(9000));
        let err = DeskConfig::try_from(&parse(&["--log-level", "loud"])).unwrap_err();
        assert_eq!(err, ConfigError::LogLevel("loud".into()));
    }

    #[test]
    fn zero_transition_is_allowed() {
        let config = DeskConfig::try_from(&parse(&["--transition-ms", "0"])).unwrap();
        assert_eq!(config.transition, Duration::ZERO);
    }
}
