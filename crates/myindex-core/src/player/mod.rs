//! Music player state over the stored playlist.

mod lyrics;
mod playback;

pub use lyrics::{is_remote_lrc, LyricLine, Lyrics};
pub use playback::{PlayOrder, Player};

use crate::models::Track;
use serde::{Deserialize, Serialize};

/// Player state together with the selected track, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub order: PlayOrder,
    pub index: Option<usize>,
    pub is_playing: bool,
    pub track: Option<Track>,
}

impl PlayerStatus {
    pub fn new(player: &Player, playlist: &[Track]) -> Self {
        Self {
            order: player.order,
            index: player.current,
            is_playing: player.is_playing,
            track: player.current.and_then(|i| playlist.get(i)).cloned(),
        }
    }
}
