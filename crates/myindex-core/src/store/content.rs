//! Fetched content and its refresh metadata.

use crate::models::{RepoSummary, Saying, Track};
use serde::{Deserialize, Serialize};

/// The independently refreshed slices of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slice {
    Sayings,
    GhRepos,
    Music,
}

impl Slice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slice::Sayings => "sayings",
            Slice::GhRepos => "gh_repos",
            Slice::Music => "music",
        }
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last successful refresh per slice, in epoch milliseconds (0 = never).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedAt {
    #[serde(default)]
    pub music: i64,
    #[serde(default)]
    pub sayings: i64,
    #[serde(default)]
    pub gh_repos: i64,
}

impl UpdatedAt {
    pub fn get(&self, slice: Slice) -> i64 {
        match slice {
            Slice::Sayings => self.sayings,
            Slice::GhRepos => self.gh_repos,
            Slice::Music => self.music,
        }
    }

    pub fn set(&mut self, slice: Slice, at: i64) {
        match slice {
            Slice::Sayings => self.sayings = at,
            Slice::GhRepos => self.gh_repos = at,
            Slice::Music => self.music = at,
        }
    }
}

/// Everything the refreshers write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentState {
    #[serde(default)]
    pub sayings: Saying,
    #[serde(default)]
    pub gh_repos: Vec<RepoSummary>,
    #[serde(default)]
    pub music: Vec<Track>,
    #[serde(default)]
    pub updated_at: UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_at_by_slice() {
        let mut at = UpdatedAt::default();
        at.set(Slice::GhRepos, 42);
        assert_eq!(at.get(Slice::GhRepos), 42);
        assert_eq!(at.get(Slice::Sayings), 0);
        assert_eq!(at.get(Slice::Music), 0);
    }

    #[test]
    fn test_partial_state_deserializes_with_defaults() {
        let state: ContentState =
            serde_json::from_str(r#"{"sayings":{"text":"t","from":"f"}}"#).unwrap();
        assert_eq!(state.sayings, Saying::new("t", "f"));
        assert!(state.gh_repos.is_empty());
        assert_eq!(state.updated_at, UpdatedAt::default());
    }
}
