//! Fetch-and-fallback refreshers, one per external source.
//!
//! Each refresher checks the throttle for its slice before touching the
//! network, then replaces the slice wholesale on success:
//! - [`SayingsRefresher`]: random pick among quote APIs, session-disabling failures
//! - [`ReposRefresher`]: one GitHub listing, errors returned to the caller
//! - [`MusicRefresher`]: ordered proxy mirrors, first success wins

mod music;
mod repos;
mod sayings;

pub use music::{playlist_url, MusicConfig, MusicRefresher};
pub use repos::{rank_repos, GhReposConfig, ReposRefresher};
pub use sayings::{default_saying_sources, SayingFormat, SayingSource, SayingsConfig, SayingsRefresher};

use serde::{Deserialize, Serialize};

/// What a refresh call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// New data was stored and the timestamp moved.
    Updated,
    /// The slice was still fresh; no network activity happened.
    Throttled,
    /// Every candidate source failed; previous data was kept.
    Unchanged,
}
