use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::playback::PlaybackError;

/// Top-level failure of a desktop run.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to start app: {0}")]
    Playback(#[from] PlaybackError),
}

pub type DeskResult<T> = Result<T, DeskError>;
