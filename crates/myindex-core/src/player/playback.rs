//! Playlist cursor and play order.

use crate::{MyIndexError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the cursor moves between tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayOrder {
    /// Walk the playlist and wrap around at either end.
    #[default]
    Loop,
    /// Stay on the current track.
    Single,
    /// Jump to a random other track.
    Random,
}

impl PlayOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayOrder::Loop => "loop",
            PlayOrder::Single => "single",
            PlayOrder::Random => "random",
        }
    }
}

impl fmt::Display for PlayOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Player state over a playlist of `len` tracks.
///
/// The player never holds the tracks themselves; callers pair
/// [`Player::current`] with the stored playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub order: PlayOrder,
    pub current: Option<usize>,
    pub is_playing: bool,
    len: usize,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at a fresh playlist: first track selected, playback stopped.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.current = if len > 0 { Some(0) } else { None };
        self.is_playing = false;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn select(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(MyIndexError::Validation {
                field: "index".to_string(),
                message: format!("track {} out of range (playlist has {})", index, self.len),
            });
        }
        self.current = Some(index);
        Ok(index)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.step(self.len.saturating_sub(1))
    }

    pub fn set_order(&mut self, order: PlayOrder) {
        self.order = order;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing && self.current.is_some();
    }

    // `offset` is forward distance modulo len; previous passes len - 1
    fn step(&mut self, offset: usize) -> Option<usize> {
        if self.len == 0 {
            self.current = None;
            return None;
        }
        let current = self.current.unwrap_or(0).min(self.len - 1);
        let next = match self.order {
            PlayOrder::Single => current,
            PlayOrder::Loop => (current + offset) % self.len,
            PlayOrder::Random if self.len == 1 => current,
            PlayOrder::Random => {
                // Draw from the other len - 1 tracks
                let pick = rand::rng().random_range(0..self.len - 1);
                if pick >= current {
                    pick + 1
                } else {
                    pick
                }
            }
        };
        self.current = Some(next);
        Some(next)
    }
}
