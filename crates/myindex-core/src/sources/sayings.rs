//! Saying (quote) refresher.
//!
//! Sources are interchangeable one-liner APIs. Each refresh picks one at
//! random among the enabled sources; a source that fails is disabled for the
//! rest of the session and another one is tried, until one succeeds or none
//! are left.

use super::RefreshOutcome;
use crate::config::RefreshConfig;
use crate::models::Saying;
use crate::network::{DynFetcher, FetchResponse};
use crate::store::{is_throttled, now_millis, GlobalStore, Slice};
use crate::{MyIndexError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// How a source's response maps onto a [`Saying`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SayingFormat {
    /// JSON `{"data": "..."}` with a fixed attribution.
    JsonData { from: String },
    /// JSON `{"hitokoto": "...", "from": "..."}`.
    Hitokoto,
    /// The body text itself, with a fixed attribution.
    PlainText { from: String },
}

#[derive(Deserialize)]
struct DataBody {
    data: String,
}

#[derive(Deserialize)]
struct HitokotoBody {
    hitokoto: String,
    #[serde(default)]
    from: Option<String>,
}

impl SayingFormat {
    /// Normalize a successful response into a saying.
    pub fn parse(&self, response: &FetchResponse) -> Result<Saying> {
        let saying = match self {
            SayingFormat::JsonData { from } => {
                let body: DataBody = response.json()?;
                Saying::new(body.data.trim(), from.as_str())
            }
            SayingFormat::Hitokoto => {
                let body: HitokotoBody = response.json()?;
                Saying::new(body.hitokoto.trim(), body.from.unwrap_or_default())
            }
            SayingFormat::PlainText { from } => Saying::new(response.text().trim(), from.as_str()),
        };

        if saying.is_empty() {
            return Err(MyIndexError::Json {
                message: format!("Empty saying from {}", response.url),
                source: None,
            });
        }
        Ok(saying)
    }
}

/// One quote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SayingSource {
    pub name: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub enable: bool,
    pub format: SayingFormat,
}

fn default_true() -> bool {
    true
}

impl SayingSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, format: SayingFormat) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            enable: true,
            format,
        }
    }
}

/// The quote APIs the page ships with.
pub fn default_saying_sources() -> Vec<SayingSource> {
    vec![
        SayingSource::new(
            "xxapi/dujitang",
            "https://v2.xxapi.cn/api/dujitang",
            SayingFormat::JsonData {
                from: "憨憨语录".to_string(),
            },
        ),
        SayingSource::new("hitokoto", "https://v1.hitokoto.cn/", SayingFormat::Hitokoto),
        SayingSource::new(
            "jkapi/one_yan",
            "https://jkapi.com/api/one_yan",
            SayingFormat::PlainText {
                from: "来自一言".to_string(),
            },
        ),
        SayingSource::new(
            "jkapi/dujitang",
            "https://jkapi.com/api/dujitang",
            SayingFormat::PlainText {
                from: "憨憨语录".to_string(),
            },
        ),
    ]
}

fn default_sayings_upd_freq() -> u64 {
    RefreshConfig::SAYINGS_UPD_FREQ_MS
}

/// Saying refresh configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SayingsConfig {
    #[serde(default = "default_saying_sources")]
    pub apis: Vec<SayingSource>,
    /// Minimum interval between refreshes, in milliseconds.
    #[serde(default = "default_sayings_upd_freq")]
    pub upd_freq: u64,
}

impl Default for SayingsConfig {
    fn default() -> Self {
        Self {
            apis: default_saying_sources(),
            upd_freq: default_sayings_upd_freq(),
        }
    }
}

/// Refreshes the saying slice, remembering failed sources for the session.
pub struct SayingsRefresher {
    fetcher: DynFetcher,
    disabled: Mutex<HashSet<String>>,
}

impl SayingsRefresher {
    pub fn new(fetcher: DynFetcher) -> Self {
        Self {
            fetcher,
            disabled: Mutex::new(HashSet::new()),
        }
    }

    /// Names of sources disabled after failing this session.
    pub fn disabled_sources(&self) -> Vec<String> {
        let disabled = self.disabled.lock().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = disabled.iter().cloned().collect();
        names.sort();
        names
    }

    /// Re-enable every source, as a fresh session would.
    pub fn reset_session(&self) {
        self.disabled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.disabled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
    }

    fn disable(&self, name: &str) {
        self.disabled
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string());
    }

    pub async fn refresh(&self, store: &GlobalStore, config: &SayingsConfig) -> Result<RefreshOutcome> {
        if is_throttled(store.last_updated(Slice::Sayings).await, config.upd_freq, now_millis()) {
            debug!("Sayings are fresh, skipping refresh");
            return Ok(RefreshOutcome::Throttled);
        }

        let mut candidates: Vec<&SayingSource> = config
            .apis
            .iter()
            .filter(|source| source.enable && !self.is_disabled(&source.name))
            .collect();

        if candidates.is_empty() {
            warn!("No available saying sources");
            return Ok(RefreshOutcome::Unchanged);
        }

        while !candidates.is_empty() {
            let index = rand::rng().random_range(0..candidates.len());
            let source = candidates.swap_remove(index);

            match self.fetch_saying(source).await {
                Ok(saying) => {
                    info!("Loaded saying from {}", source.name);
                    store.set_sayings(saying, now_millis()).await;
                    return Ok(RefreshOutcome::Updated);
                }
                Err(e) => {
                    warn!("Saying source {} failed, disabling it: {}", source.name, e);
                    self.disable(&source.name);
                }
            }
        }

        warn!("All saying sources failed, keeping previous saying");
        Ok(RefreshOutcome::Unchanged)
    }

    async fn fetch_saying(&self, source: &SayingSource) -> Result<Saying> {
        let response = self.fetcher.get(&source.url).await?.error_for_status()?;
        source.format.parse(&response)
    }
}
