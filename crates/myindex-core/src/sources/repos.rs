//! Repository list refresher.

use super::RefreshOutcome;
use crate::config::RefreshConfig;
use crate::models::RepoSummary;
use crate::network::{default_repos_api, DynFetcher, GitHubClient};
use crate::store::{is_throttled, now_millis, GlobalStore, Slice};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_user() -> String {
    "Roy-Jin".to_string()
}

fn default_show_count() -> usize {
    4
}

fn default_repos_upd_freq() -> u64 {
    RefreshConfig::GH_REPOS_UPD_FREQ_MS
}

/// Repository list configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhReposConfig {
    /// GitHub user whose repositories are listed.
    #[serde(default = "default_user", alias = "name")]
    pub user: String,
    /// How many repositories to keep after ranking.
    #[serde(default = "default_show_count")]
    pub show_count: usize,
    /// URL template; `{user}` is replaced with the user.
    #[serde(default = "default_repos_api")]
    pub api: String,
    /// Minimum interval between refreshes, in milliseconds.
    #[serde(default = "default_repos_upd_freq")]
    pub upd_freq: u64,
}

impl Default for GhReposConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            show_count: default_show_count(),
            api: default_repos_api(),
            upd_freq: default_repos_upd_freq(),
        }
    }
}

/// Sort by stars, most first, and keep the top `show_count`.
///
/// The sort is stable, so equally starred repositories keep GitHub's order.
pub fn rank_repos(mut repos: Vec<RepoSummary>, show_count: usize) -> Vec<RepoSummary> {
    repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    repos.truncate(show_count);
    repos
}

/// Refreshes the repository slice from a single GitHub listing.
pub struct ReposRefresher {
    github: GitHubClient,
}

impl ReposRefresher {
    pub fn new(fetcher: DynFetcher) -> Self {
        Self {
            github: GitHubClient::new(fetcher),
        }
    }

    /// Fetch, rank and store. Errors leave the previous list in place.
    pub async fn refresh(&self, store: &GlobalStore, config: &GhReposConfig) -> Result<RefreshOutcome> {
        if is_throttled(store.last_updated(Slice::GhRepos).await, config.upd_freq, now_millis()) {
            debug!("Repositories are fresh, skipping refresh");
            return Ok(RefreshOutcome::Throttled);
        }

        let repos = self.github.list_user_repos(&config.api, &config.user).await?;
        store
            .set_gh_repos(rank_repos(repos, config.show_count), now_millis())
            .await;
        Ok(RefreshOutcome::Updated)
    }
}
