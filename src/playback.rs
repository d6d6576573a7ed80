//! Simulated audio playback: a playlist, a transport and a progress clock.
//!
//! No audio is decoded. Progress is advanced by a periodic [`Timer`] while
//! playing, one step of `100 / duration` percent per elapsed second.

use std::time::Instant;

use thiserror::Error;

use crate::constants::PLAYBACK_TICK;
use crate::timer::Timer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playlist is empty")]
    EmptyPlaylist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: u32,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Playback {
    tracks: Vec<Track>,
    current: usize,
    // percent, 0.0..100.0
    progress: f64,
    playing: bool,
    volume: u8,
    clock: Timer,
}

impl Playback {
    pub const DEFAULT_VOLUME: u8 = 70;

    pub fn new(tracks: Vec<Track>) -> Result<Self, PlaybackError> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        Ok(Self {
            tracks,
            current: 0,
            progress: 0.0,
            playing: false,
            volume: Self::DEFAULT_VOLUME,
            clock: Timer::idle(),
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    pub fn adjust_volume(&mut self, delta: i16) {
        let next = (self.volume as i16 + delta).clamp(0, 100);
        self.volume = next as u8;
    }

    /// Seconds played in the current track.
    pub fn elapsed(&self) -> u32 {
        let secs = self.progress / 100.0 * self.current().duration_secs as f64;
        secs.floor() as u32
    }

    pub fn play(&mut self, now: Instant) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.clock.every(now, PLAYBACK_TICK);
        tracing::debug!(track = %self.current().title, "playback started");
    }

    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.clock.cancel();
        tracing::debug!(track = %self.current().title, "playback paused");
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.pause();
        } else {
            self.play(now);
        }
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.tracks.len();
        self.progress = 0.0;
    }

    pub fn previous(&mut self) {
        self.current = if self.current == 0 {
            self.tracks.len() - 1
        } else {
            self.current - 1
        };
        self.progress = 0.0;
    }

    /// Jumps to `index` and starts playing from the beginning. Out-of-range
    /// indices are ignored.
    pub fn select(&mut self, index: usize, now: Instant) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current = index;
        self.progress = 0.0;
        // restart the clock so the first step lands a full second later
        self.playing = false;
        self.play(now);
        true
    }

    /// Advances progress for every second elapsed since the last tick.
    /// Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        let fired = self.clock.poll(now);
        for _ in 0..fired {
            self.step();
        }
        fired > 0
    }

    // a finished track shows 100% for one tick before moving on
    fn step(&mut self) {
        if self.progress >= 100.0 {
            self.next();
            tracing::debug!(track = %self.current().title, "advanced to next track");
            return;
        }
        let duration = self.current().duration_secs.max(1) as f64;
        self.progress = (self.progress + 100.0 / duration).min(100.0);
    }

    /// Stops the clock; used when the hosting window closes.
    pub fn teardown(&mut self) {
        self.playing = false;
        self.clock.cancel();
    }
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
