//! The global store: preferences plus fetched content.
//!
//! State lives in memory behind an async `RwLock` and is mirrored into a
//! single [`LocalStorage`] entry under [`StorageConfig::GLOBAL_KEY`]. The
//! entry always carries `lang` and `theme`; the fetched content is written
//! alongside only when content persistence is enabled.

use super::content::{ContentState, Slice, UpdatedAt};
use crate::config::StorageConfig;
use crate::models::{Preferences, RepoSummary, Saying, Theme, Track};
use crate::storage::LocalStorage;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Full store contents, in the shape it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    #[serde(flatten)]
    pub preferences: Preferences,
    #[serde(flatten)]
    pub content: ContentState,
}

pub struct GlobalStore {
    storage: Arc<LocalStorage>,
    persist_content: bool,
    state: RwLock<GlobalState>,
}

impl GlobalStore {
    /// Load the store from `storage`, starting from defaults on first run.
    pub fn load(storage: Arc<LocalStorage>, persist_content: bool) -> Result<Self> {
        let mut state = match storage.get_item::<GlobalState>(StorageConfig::GLOBAL_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => GlobalState::default(),
            Err(e) => {
                warn!("Ignoring unreadable {} entry: {}", StorageConfig::GLOBAL_KEY, e);
                GlobalState::default()
            }
        };
        if !persist_content {
            state.content = ContentState::default();
        }
        debug!(
            "Loaded global store (lang={}, theme={})",
            state.preferences.lang, state.preferences.theme
        );

        Ok(Self {
            storage,
            persist_content,
            state: RwLock::new(state),
        })
    }

    /// Whether fetched content is written to storage.
    pub fn persists_content(&self) -> bool {
        self.persist_content
    }

    pub async fn snapshot(&self) -> GlobalState {
        self.state.read().await.clone()
    }

    pub async fn preferences(&self) -> Preferences {
        self.state.read().await.preferences.clone()
    }

    pub async fn toggle_theme(&self) -> Result<Theme> {
        self.update_preferences(|prefs| prefs.toggle_theme()).await
    }

    pub async fn toggle_lang(&self, lang: Option<&str>) -> Result<String> {
        self.update_preferences(|prefs| prefs.toggle_lang(lang).to_string())
            .await
    }

    // Applied to a copy; memory only changes after the write succeeds
    async fn update_preferences<T>(&self, apply: impl FnOnce(&mut Preferences) -> T) -> Result<T> {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let result = apply(&mut next.preferences);
        self.persist(&next)?;
        *state = next;
        Ok(result)
    }

    pub async fn sayings(&self) -> Saying {
        self.state.read().await.content.sayings.clone()
    }

    pub async fn gh_repos(&self) -> Vec<RepoSummary> {
        self.state.read().await.content.gh_repos.clone()
    }

    pub async fn music(&self) -> Vec<Track> {
        self.state.read().await.content.music.clone()
    }

    pub async fn updated_at(&self) -> UpdatedAt {
        self.state.read().await.content.updated_at
    }

    pub async fn last_updated(&self, slice: Slice) -> i64 {
        self.state.read().await.content.updated_at.get(slice)
    }

    pub async fn set_sayings(&self, saying: Saying, at: i64) {
        let mut state = self.state.write().await;
        state.content.sayings = saying;
        state.content.updated_at.set(Slice::Sayings, at);
        self.persist_content_change(&state);
    }

    pub async fn set_gh_repos(&self, repos: Vec<RepoSummary>, at: i64) {
        let mut state = self.state.write().await;
        state.content.gh_repos = repos;
        state.content.updated_at.set(Slice::GhRepos, at);
        self.persist_content_change(&state);
    }

    pub async fn set_music(&self, tracks: Vec<Track>, at: i64) {
        let mut state = self.state.write().await;
        state.content.music = tracks;
        state.content.updated_at.set(Slice::Music, at);
        self.persist_content_change(&state);
    }

    fn persist(&self, state: &GlobalState) -> Result<()> {
        if self.persist_content {
            self.storage.set_item(StorageConfig::GLOBAL_KEY, state)
        } else {
            self.storage
                .set_item(StorageConfig::GLOBAL_KEY, &state.preferences)
        }
    }

    // Content stays updated in memory even if the disk write fails
    fn persist_content_change(&self, state: &GlobalState) {
        if !self.persist_content {
            return;
        }
        if let Err(e) = self.persist(state) {
            warn!("Failed to persist global store: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_storage(dir: &TempDir) -> Arc<LocalStorage> {
        Arc::new(LocalStorage::open(dir.path().join("local-storage.json")).unwrap())
    }

    #[tokio::test]
    async fn test_defaults_on_first_run() {
        let dir = TempDir::new().unwrap();
        let store = GlobalStore::load(open_storage(&dir), false).unwrap();

        let prefs = store.preferences().await;
        assert_eq!(prefs.lang, "zh");
        assert_eq!(prefs.theme, Theme::Light);
        assert!(store.sayings().await.is_empty());
    }

    #[tokio::test]
    async fn test_preferences_survive_reload() {
        let dir = TempDir::new().unwrap();
        {
            let store = GlobalStore::load(open_storage(&dir), false).unwrap();
            store.toggle_theme().await.unwrap();
            store.toggle_lang(Some("en")).await.unwrap();
        }

        let store = GlobalStore::load(open_storage(&dir), false).unwrap();
        let prefs = store.preferences().await;
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.lang, "en");
    }

    #[tokio::test]
    async fn test_content_not_persisted_by_default() {
        let dir = TempDir::new().unwrap();
        {
            let store = GlobalStore::load(open_storage(&dir), false).unwrap();
            store.set_sayings(Saying::new("t", "f"), 10).await;
            store.toggle_theme().await.unwrap();
        }

        let store = GlobalStore::load(open_storage(&dir), false).unwrap();
        assert!(store.sayings().await.is_empty());
        assert_eq!(store.last_updated(Slice::Sayings).await, 0);
    }

    #[tokio::test]
    async fn test_content_persisted_when_enabled() {
        let dir = TempDir::new().unwrap();
        {
            let store = GlobalStore::load(open_storage(&dir), true).unwrap();
            store.set_sayings(Saying::new("t", "f"), 10).await;
            store
                .set_gh_repos(vec![RepoSummary::new("r", "https://github.com/a/r", 1)], 20)
                .await;
        }

        let store = GlobalStore::load(open_storage(&dir), true).unwrap();
        assert_eq!(store.sayings().await, Saying::new("t", "f"));
        assert_eq!(store.gh_repos().await.len(), 1);
        let at = store.updated_at().await;
        assert_eq!((at.sayings, at.gh_repos, at.music), (10, 20, 0));
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_previous_preferences() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let storage = Arc::new(LocalStorage::open(data_dir.join("local-storage.json")).unwrap());
        let store = GlobalStore::load(storage, false).unwrap();

        std::fs::write(&data_dir, "not a directory").unwrap();

        assert!(store.toggle_theme().await.is_err());
        assert!(store.toggle_lang(Some("en")).await.is_err());
        let prefs = store.preferences().await;
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.lang, "zh");

        std::fs::remove_file(&data_dir).unwrap();
        assert_eq!(store.toggle_lang(None).await.unwrap(), "en");
        let raw: serde_json::Value = LocalStorage::open(data_dir.join("local-storage.json"))
            .unwrap()
            .get_item(StorageConfig::GLOBAL_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(raw, serde_json::json!({"lang": "en", "theme": "light"}));
    }

    #[tokio::test]
    async fn test_persisted_entry_uses_fixed_key() {
        let dir = TempDir::new().unwrap();
        let storage = open_storage(&dir);
        let store = GlobalStore::load(storage.clone(), false).unwrap();
        store.toggle_theme().await.unwrap();

        assert_eq!(storage.keys(), vec![StorageConfig::GLOBAL_KEY.to_string()]);
        let raw: serde_json::Value = storage.get_item(StorageConfig::GLOBAL_KEY).unwrap().unwrap();
        assert_eq!(raw, serde_json::json!({"lang": "zh", "theme": "dark"}));
    }
}
