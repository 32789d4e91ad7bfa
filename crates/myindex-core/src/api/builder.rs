//! Builder for configuring MyIndexApi initialization.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::config::StorageConfig;
use crate::error::{MyIndexError, Result};
use crate::network::{DynFetcher, HttpClient};
use crate::player::Player;
use crate::profile::SiteProfile;
use crate::sources::{MusicRefresher, ReposRefresher, SayingsRefresher};
use crate::storage::LocalStorage;
use crate::store::GlobalStore;
use crate::MyIndexApi;

/// Builder for configuring MyIndexApi initialization.
///
/// # Example
///
/// ```rust,ignore
/// use myindex_core::MyIndexApi;
///
/// let api = MyIndexApi::builder("./data")
///     .auto_create_dirs(true)
///     .site_config_path("./site.json")
///     .request_timeout(std::time::Duration::from_secs(10))
///     .build()
///     .await?;
/// ```
pub struct MyIndexApiBuilder {
    data_root: PathBuf,
    auto_create_dirs: bool,
    site_profile: Option<SiteProfile>,
    site_config_path: Option<PathBuf>,
    persist_content: bool,
    request_timeout: Option<Duration>,
    fetcher: Option<DynFetcher>,
}

impl MyIndexApiBuilder {
    /// Create a new builder with the data root directory.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            auto_create_dirs: false,
            site_profile: None,
            site_config_path: None,
            persist_content: false,
            request_timeout: None,
            fetcher: None,
        }
    }

    /// Auto-create the data root if it doesn't exist.
    ///
    /// Default: `false` (the directory must exist)
    pub fn auto_create_dirs(mut self, enable: bool) -> Self {
        self.auto_create_dirs = enable;
        self
    }

    /// Use this profile instead of reading one from disk.
    pub fn site_profile(mut self, profile: SiteProfile) -> Self {
        self.site_profile = Some(profile);
        self
    }

    /// Read the site profile from `path`.
    ///
    /// Default: `<data_root>/site.json`; the built-in profile is used when
    /// the file is absent. Ignored when [`Self::site_profile`] is set.
    pub fn site_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.site_config_path = Some(path.into());
        self
    }

    /// Persist fetched content and its timestamps, not only preferences.
    ///
    /// With persistence on, throttling carries over across restarts.
    ///
    /// Default: `false`
    pub fn persist_content(mut self, enable: bool) -> Self {
        self.persist_content = enable;
        self
    }

    /// Apply a timeout to every outbound request.
    ///
    /// Default: none. Ignored when a custom fetcher is supplied.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Route all outbound requests through `fetcher`.
    pub fn with_fetcher(mut self, fetcher: DynFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    fn ensure_data_root(&self) -> Result<()> {
        if self.data_root.exists() {
            return Ok(());
        }
        if !self.auto_create_dirs {
            return Err(MyIndexError::Config {
                message: format!("Data root does not exist: {}", self.data_root.display()),
            });
        }
        std::fs::create_dir_all(&self.data_root).map_err(|e| MyIndexError::Io {
            message: format!("Failed to create data root: {}", self.data_root.display()),
            path: Some(self.data_root.clone()),
            source: Some(e),
        })
    }

    fn load_profile(
        data_root: &Path,
        profile: Option<SiteProfile>,
        path: Option<PathBuf>,
    ) -> Result<SiteProfile> {
        match profile {
            Some(profile) => Ok(profile),
            None => {
                let path =
                    path.unwrap_or_else(|| data_root.join(StorageConfig::SITE_CONFIG_FILENAME));
                SiteProfile::load(&path)
            }
        }
    }

    /// Build the MyIndexApi instance.
    pub async fn build(self) -> Result<MyIndexApi> {
        self.ensure_data_root()?;

        let profile = Self::load_profile(&self.data_root, self.site_profile, self.site_config_path)?;

        let storage = LocalStorage::open(self.data_root.join(StorageConfig::LOCAL_STORAGE_FILENAME))?;
        let store = GlobalStore::load(Arc::new(storage), self.persist_content)?;

        let fetcher: DynFetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => {
                let client = match self.request_timeout {
                    Some(timeout) => HttpClient::with_timeout(timeout)?,
                    None => HttpClient::new()?,
                };
                Arc::new(client)
            }
        };

        // A persisted playlist starts out selected but paused
        let mut player = Player::new();
        player.reset(store.music().await.len());

        tracing::info!(
            "MyIndex API ready at {} (persist_content={})",
            self.data_root.display(),
            store.persists_content()
        );

        Ok(MyIndexApi {
            data_root: self.data_root,
            profile,
            store,
            sayings: SayingsRefresher::new(fetcher.clone()),
            repos: ReposRefresher::new(fetcher.clone()),
            music: MusicRefresher::new(fetcher.clone()),
            fetcher,
            player: RwLock::new(player),
            lyrics: Mutex::new(None),
        })
    }
}
