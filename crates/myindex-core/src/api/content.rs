//! Content refresh methods on MyIndexApi.

use crate::models::{RepoSummary, Saying, Track};
use crate::sources::RefreshOutcome;
use crate::store::UpdatedAt;
use crate::{MyIndexApi, Result};

impl MyIndexApi {
    // ========================================
    // Sayings
    // ========================================

    pub async fn sayings(&self) -> Saying {
        self.store.sayings().await
    }

    /// Refresh the saying from a random enabled source.
    ///
    /// Source failures are absorbed; the saying is left as it was when every
    /// source fails.
    pub async fn load_sayings(&self) -> Result<RefreshOutcome> {
        self.sayings.refresh(&self.store, &self.profile.sayings).await
    }

    /// Sources disabled after failing during this session.
    pub fn disabled_saying_sources(&self) -> Vec<String> {
        self.sayings.disabled_sources()
    }

    // ========================================
    // GitHub Repositories
    // ========================================

    pub async fn gh_repos(&self) -> Vec<RepoSummary> {
        self.store.gh_repos().await
    }

    /// Refresh the repository list. Unlike the other slices, errors are returned.
    pub async fn load_gh_repos(&self) -> Result<RefreshOutcome> {
        self.repos.refresh(&self.store, &self.profile.github_repos).await
    }

    // ========================================
    // Music
    // ========================================

    pub async fn music(&self) -> Vec<Track> {
        self.store.music().await
    }

    /// Refresh the playlist from the first mirror that answers.
    ///
    /// A new playlist resets the player to its first track, paused.
    pub async fn load_music(&self) -> Result<RefreshOutcome> {
        let outcome = self.music.refresh(&self.store, &self.profile.music).await?;
        if outcome == RefreshOutcome::Updated {
            let len = self.store.music().await.len();
            self.player.write().await.reset(len);
            *self.lyrics.lock().await = None;
        }
        Ok(outcome)
    }

    /// Last successful refresh time of each slice, in epoch milliseconds.
    pub async fn updated_at(&self) -> UpdatedAt {
        self.store.updated_at().await
    }
}
