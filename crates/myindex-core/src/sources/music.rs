//! Music playlist refresher.
//!
//! Mirrors of a Meting-style proxy are tried in the configured order; the
//! first that answers with a track array wins. Proxies list the newest track
//! first, the player wants the reverse.

use super::RefreshOutcome;
use crate::config::RefreshConfig;
use crate::models::{RawTrack, Track};
use crate::network::DynFetcher;
use crate::store::{is_throttled, now_millis, GlobalStore, Slice};
use crate::{MyIndexError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};
use url::Url;

fn default_mirrors() -> Vec<String> {
    vec![
        "https://api.injahow.cn/meting/".to_string(),
        "https://api.i-meto.com/meting/api".to_string(),
    ]
}

fn default_server() -> String {
    "netease".to_string()
}

fn default_kind() -> String {
    "playlist".to_string()
}

fn default_id() -> String {
    "7697114803".to_string()
}

fn default_music_upd_freq() -> u64 {
    RefreshConfig::MUSIC_UPD_FREQ_MS
}

// A single mirror may be given as a bare string
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(api) => vec![api],
        OneOrMany::Many(apis) => apis,
    })
}

/// Music playlist configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Proxy mirrors, tried in order.
    #[serde(default = "default_mirrors", alias = "api", deserialize_with = "one_or_many")]
    pub apis: Vec<String>,
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    #[serde(default = "default_id")]
    pub id: String,
    /// Minimum interval between refreshes, in milliseconds.
    #[serde(default = "default_music_upd_freq")]
    pub upd_freq: u64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            apis: default_mirrors(),
            server: default_server(),
            kind: default_kind(),
            id: default_id(),
            upd_freq: default_music_upd_freq(),
        }
    }
}

/// Build the playlist request URL for one mirror.
///
/// `server`, `type` and `id` replace any values already present in the
/// mirror's query string; other parameters are kept.
pub fn playlist_url(base: &str, config: &MusicConfig) -> Result<String> {
    let mut url = Url::parse(base).map_err(|e| MyIndexError::Config {
        message: format!("Invalid music mirror {}: {}", base, e),
    })?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !matches!(key.as_ref(), "server" | "type" | "id"))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("server", &config.server)
        .append_pair("type", &config.kind)
        .append_pair("id", &config.id);

    Ok(url.into())
}

/// Refreshes the music slice from the first mirror that answers.
pub struct MusicRefresher {
    fetcher: DynFetcher,
}

impl MusicRefresher {
    pub fn new(fetcher: DynFetcher) -> Self {
        Self { fetcher }
    }

    pub async fn refresh(&self, store: &GlobalStore, config: &MusicConfig) -> Result<RefreshOutcome> {
        if is_throttled(store.last_updated(Slice::Music).await, config.upd_freq, now_millis()) {
            debug!("Playlist is fresh, skipping refresh");
            return Ok(RefreshOutcome::Throttled);
        }

        for mirror in &config.apis {
            match self.fetch_playlist(mirror, config).await {
                Ok(tracks) => {
                    info!("Loaded {} tracks from {}", tracks.len(), mirror);
                    store.set_music(tracks, now_millis()).await;
                    return Ok(RefreshOutcome::Updated);
                }
                Err(e) => warn!("Music mirror {} failed: {}", mirror, e),
            }
        }

        warn!("All music mirrors failed, keeping previous playlist");
        Ok(RefreshOutcome::Unchanged)
    }

    async fn fetch_playlist(&self, mirror: &str, config: &MusicConfig) -> Result<Vec<Track>> {
        let url = playlist_url(mirror, config)?;
        let raw: Vec<RawTrack> = self.fetcher.get(&url).await?.error_for_status()?.json()?;
        Ok(raw.into_iter().rev().map(Track::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::StubFetcher;
    use crate::storage::LocalStorage;
    use std::sync::Arc;
    use tempfile::TempDir;

    const QUERY: &str = "server=netease&type=playlist&id=7697114803";

    fn store(dir: &TempDir) -> GlobalStore {
        let storage = LocalStorage::open(dir.path().join("ls.json")).unwrap();
        GlobalStore::load(Arc::new(storage), false).unwrap()
    }

    fn config(apis: &[&str]) -> MusicConfig {
        MusicConfig {
            apis: apis.iter().map(|s| s.to_string()).collect(),
            ..MusicConfig::default()
        }
    }

    #[test]
    fn test_playlist_url() {
        let url = playlist_url("https://api.injahow.cn/meting/", &MusicConfig::default()).unwrap();
        assert_eq!(url, format!("https://api.injahow.cn/meting/?{}", QUERY));
    }

    #[test]
    fn test_playlist_url_replaces_existing_params() {
        let url = playlist_url("https://m.example/api?id=1&auth=x", &MusicConfig::default()).unwrap();
        assert_eq!(url, format!("https://m.example/api?auth=x&{}", QUERY));
    }

    #[test]
    fn test_playlist_url_rejects_garbage() {
        assert!(matches!(
            playlist_url("not a url", &MusicConfig::default()),
            Err(MyIndexError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_falls_through_to_second_mirror_and_reverses() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let a = format!("https://a.example/?{}", QUERY);
        let b = format!("https://b.example/?{}", QUERY);
        let c = format!("https://c.example/?{}", QUERY);
        let fetcher = Arc::new(
            StubFetcher::new()
                .route(&a, 500, "")
                .route(
                    &b,
                    200,
                    r#"[{"name":"t1","artist":"x","url":"u1","pic":"p1","lrc":"l1"},
                        {"title":"t2","author":"y","url":"u2","pic":"p2","lrc":"l2"}]"#,
                )
                .route(&c, 200, "[]"),
        );
        let refresher = MusicRefresher::new(fetcher.clone());

        let outcome = refresher
            .refresh(
                &store,
                &config(&["https://a.example/", "https://b.example/", "https://c.example/"]),
            )
            .await
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Updated);
        let names: Vec<String> = store.music().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["t2", "t1"]);
        assert_eq!(store.music().await[0].artist, "y");
        assert_eq!(fetcher.calls(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_all_mirrors_failing_keeps_playlist() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set_music(vec![Track::default()], 0).await;
        let a = format!("https://a.example/?{}", QUERY);
        let fetcher = Arc::new(StubFetcher::new().route(&a, 200, "{\"error\":true}"));
        let refresher = MusicRefresher::new(fetcher.clone());

        let outcome = refresher
            .refresh(&store, &config(&["https://a.example/", "https://b.example/"]))
            .await
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Unchanged);
        assert_eq!(store.music().await.len(), 1);
        assert_eq!(fetcher.calls().len(), 2);
        assert_eq!(store.last_updated(Slice::Music).await, 0);
    }

    #[tokio::test]
    async fn test_throttled_refresh_makes_no_request() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set_music(vec![], now_millis()).await;
        let fetcher = Arc::new(StubFetcher::new());
        let refresher = MusicRefresher::new(fetcher.clone());

        let outcome = refresher
            .refresh(&store, &config(&["https://a.example/"]))
            .await
            .unwrap();

        assert_eq!(outcome, RefreshOutcome::Throttled);
        assert!(fetcher.calls().is_empty());
    }

    #[test]
    fn test_config_type_field() {
        let config: MusicConfig =
            serde_json::from_str(r#"{"api":["https://m/"],"type":"album","id":"1"}"#).unwrap();
        assert_eq!(config.kind, "album");
        assert_eq!(config.apis, vec!["https://m/".to_string()]);
        assert_eq!(config.server, "netease");
    }

    #[test]
    fn test_config_single_mirror_string() {
        let config: MusicConfig = serde_json::from_str(r#"{"api":"https://m/"}"#).unwrap();
        assert_eq!(config.apis, vec!["https://m/".to_string()]);
        assert_eq!(config.id, "7697114803");
    }
}
