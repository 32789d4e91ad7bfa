//! GitHub repository types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of `GET /users/{user}/repos`.
///
/// Only the fields the page reads are typed; everything else GitHub sends is
/// kept in `extra` so the entry round-trips verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RepoSummary {
    pub fn new(name: impl Into<String>, html_url: impl Into<String>, stars: u64) -> Self {
        Self {
            name: name.into(),
            html_url: html_url.into(),
            description: None,
            stargazers_count: stars,
            extra: Map::new(),
        }
    }
}
