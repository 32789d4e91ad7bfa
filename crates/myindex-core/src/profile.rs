//! Site profile: the static identity shown on the page plus refresh settings.
//!
//! Loaded once from `site.json`; every field falls back to the built-in
//! profile when missing.

use crate::sources::{GhReposConfig, MusicConfig, SayingsConfig};
use crate::storage::atomic_read_json;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One social link in the profile header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    /// CSS color value.
    pub color: String,
    /// Icon class list.
    pub icon: String,
    pub href: String,
}

impl SocialLink {
    fn new(name: &str, color: &str, icon: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            href: href.to_string(),
        }
    }
}

fn default_name() -> String {
    "Roy-Jin.".to_string()
}

fn default_title() -> Vec<String> {
    vec!["Roy-Jin".to_string(), "MyIndex".to_string()]
}

fn default_avatar() -> Vec<String> {
    vec!["/avatar.png".to_string(), "/avatar-nobg.png".to_string()]
}

fn default_social() -> Vec<SocialLink> {
    vec![
        SocialLink::new(
            "GitHub",
            "var(--text-color)",
            "fa-brands fa-github",
            "https://github.com/Roy-Jin",
        ),
        SocialLink::new(
            "Email",
            "#ee7a5a",
            "fa-solid fa-envelope",
            "mailto:JinRoy@outlook.com",
        ),
        SocialLink::new(
            "QQ",
            "#12b7f5",
            "fa-brands fa-qq",
            "https://qm.qq.com/q/2Qaj5mB6Jq",
        ),
        SocialLink::new(
            "Bilibili",
            "#fc8bab",
            "fa-brands fa-bilibili",
            "https://space.bilibili.com/3461572714302163",
        ),
    ]
}

fn default_copyright() -> String {
    "Copyright © 2024 - 2026 Roy-Jin".to_string()
}

/// Read-only site profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    #[serde(default = "default_name")]
    pub name: String,
    /// Rotating titles under the name.
    #[serde(default = "default_title")]
    pub title: Vec<String>,
    #[serde(default = "default_avatar")]
    pub avatar: Vec<String>,
    #[serde(default = "default_social")]
    pub social: Vec<SocialLink>,
    #[serde(default = "default_copyright")]
    pub copyright: String,
    #[serde(default)]
    pub sayings: SayingsConfig,
    #[serde(default)]
    pub github_repos: GhReposConfig,
    #[serde(default)]
    pub music: MusicConfig,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
            avatar: default_avatar(),
            social: default_social(),
            copyright: default_copyright(),
            sayings: SayingsConfig::default(),
            github_repos: GhReposConfig::default(),
            music: MusicConfig::default(),
        }
    }
}

impl SiteProfile {
    /// Load the profile from `path`, or the built-in profile if the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        match atomic_read_json::<SiteProfile>(path)? {
            Some(profile) => {
                info!("Loaded site profile from {}", path.display());
                Ok(profile)
            }
            None => {
                debug!("No site profile at {}, using built-in profile", path.display());
                Ok(Self::default())
            }
        }
    }
}
