//! Centralized configuration constants for MyIndex.
//!
//! Per-site values (profile, refresh intervals, endpoints) live in
//! [`crate::profile::SiteProfile`]; this module only holds what is fixed for
//! every deployment.

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "MyIndex";
    pub const USER_AGENT: &'static str = "MyIndex/0.3";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const GITHUB_API_BASE: &'static str = "https://api.github.com";
    pub const GITHUB_ACCEPT: &'static str = "application/vnd.github.v3+json";
    /// Delay applied before a request when the remote rate limit is nearly spent.
    pub const THROTTLE_DELAY: Duration = Duration::from_millis(500);
}

/// Persisted storage layout.
pub struct StorageConfig;

impl StorageConfig {
    /// Key of the single namespaced entry holding the global store.
    pub const GLOBAL_KEY: &'static str = "myindex-global";
    pub const LOCAL_STORAGE_FILENAME: &'static str = "local-storage.json";
    pub const SITE_CONFIG_FILENAME: &'static str = "site.json";
}

/// Default refresh intervals, in milliseconds.
pub struct RefreshConfig;

impl RefreshConfig {
    pub const SAYINGS_UPD_FREQ_MS: u64 = 5 * 60 * 1000;
    pub const GH_REPOS_UPD_FREQ_MS: u64 = 60 * 60 * 1000;
    pub const MUSIC_UPD_FREQ_MS: u64 = 24 * 60 * 60 * 1000;
}
