//! Music track types.

use serde::{Deserialize, Serialize};

/// A playable track as stored in the playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub url: String,
    pub name: String,
    pub artist: String,
    pub pic: String,
    /// LRC lyrics text, or a URL pointing at it.
    pub lrc: String,
}

/// A track as returned by a Meting-style proxy.
///
/// Mirrors disagree on field names: some send `name`/`artist`, others
/// `title`/`author`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub pic: Option<String>,
    #[serde(default)]
    pub lrc: Option<String>,
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> String {
    primary
        .filter(|s| !s.is_empty())
        .or(fallback)
        .unwrap_or_default()
}

impl From<RawTrack> for Track {
    fn from(raw: RawTrack) -> Self {
        Self {
            url: raw.url.unwrap_or_default(),
            name: first_non_empty(raw.name, raw.title),
            artist: first_non_empty(raw.artist, raw.author),
            pic: raw.pic.unwrap_or_default(),
            lrc: raw.lrc.unwrap_or_default(),
        }
    }
}
