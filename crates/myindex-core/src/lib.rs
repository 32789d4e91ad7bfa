//! MyIndex Core - headless library behind a personal home page.
//!
//! This crate holds the page's state and the logic that keeps it fresh:
//! persisted preferences (language, theme), throttled refreshers for quotes,
//! GitHub repositories and a music playlist, and the music player cursor.
//! It can be used programmatically without any HTTP/RPC layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use myindex_core::MyIndexApi;
//!
//! #[tokio::main]
//! async fn main() -> myindex_core::Result<()> {
//!     let api = MyIndexApi::new("/path/to/data").await?;
//!
//!     api.load_sayings().await?;
//!     println!("{}", api.sayings().await.text);
//!
//!     api.toggle_theme().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod player;
pub mod profile;
pub mod sources;
pub mod storage;
pub mod store;

mod api;

// Re-export commonly used types
pub use error::{MyIndexError, Result};
pub use models::{Preferences, RepoSummary, Saying, Theme, Track};
pub use network::{DynFetcher, FetchResponse, Fetcher, HttpClient};
pub use player::{LyricLine, Lyrics, PlayOrder, Player, PlayerStatus};
pub use profile::{SiteProfile, SocialLink};
pub use sources::{
    GhReposConfig, MusicConfig, MusicRefresher, RefreshOutcome, ReposRefresher, SayingSource,
    SayingsConfig, SayingsRefresher,
};
pub use store::{GlobalState, GlobalStore, Slice, UpdatedAt};

// Re-export builder from api module
pub use api::MyIndexApiBuilder;

use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

/// Main API struct for MyIndex operations.
///
/// Owns the global store, the site profile and one refresher per content
/// slice. All methods take `&self`; share it behind an `Arc`.
pub struct MyIndexApi {
    /// Directory holding `local-storage.json` (and `site.json` by default)
    data_root: PathBuf,
    profile: SiteProfile,
    store: GlobalStore,
    fetcher: DynFetcher,
    sayings: SayingsRefresher,
    repos: ReposRefresher,
    music: MusicRefresher,
    player: RwLock<Player>,
    /// Parsed lyrics of the last track asked about, keyed by its `lrc` field
    lyrics: Mutex<Option<(String, Lyrics)>>,
}

impl MyIndexApi {
    /// Create a builder for MyIndexApi.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let api = MyIndexApi::builder("./data")
    ///     .auto_create_dirs(true)
    ///     .persist_content(true)
    ///     .build()
    ///     .await?;
    /// ```
    pub fn builder(data_root: impl Into<PathBuf>) -> MyIndexApiBuilder {
        MyIndexApiBuilder::new(data_root)
    }

    /// Create a MyIndexApi with default options, creating `data_root` if needed.
    pub async fn new(data_root: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(data_root).auto_create_dirs(true).build().await
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Get the global store for direct access.
    pub fn store(&self) -> &GlobalStore {
        &self.store
    }
}
