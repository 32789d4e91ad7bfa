//! GitHub API client for listing a user's repositories.

use crate::config::NetworkConfig;
use crate::models::RepoSummary;
use crate::network::web_source::DynFetcher;
use crate::{MyIndexError, Result};
use tracing::info;

/// Placeholders accepted in a repository-list URL template.
const USER_PLACEHOLDERS: [&str; 4] = ["{user}", "{name}", "{0}", "%name%"];

/// Default repository-list URL template.
pub fn default_repos_api() -> String {
    format!("{}/users/{{user}}/repos?per_page=10", NetworkConfig::GITHUB_API_BASE)
}

/// Fill the user into a repository-list URL template.
pub fn user_repos_url(template: &str, user: &str) -> String {
    let user = urlencoding::encode(user);
    USER_PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |url, placeholder| {
            url.replace(placeholder, &user)
        })
}

/// GitHub API client.
pub struct GitHubClient {
    fetcher: DynFetcher,
}

impl GitHubClient {
    pub fn new(fetcher: DynFetcher) -> Self {
        Self { fetcher }
    }

    /// List the public repositories of `user`, in the order GitHub returns them.
    pub async fn list_user_repos(&self, api_template: &str, user: &str) -> Result<Vec<RepoSummary>> {
        let url = user_repos_url(api_template, user);
        let response = self.fetcher.get(&url).await?;

        // GitHub answers 403 once the unauthenticated quota is spent
        if response.status == 403 {
            return Err(MyIndexError::RateLimited {
                service: "GitHub".to_string(),
                retry_after_secs: None,
            });
        }

        let repos: Vec<RepoSummary> = response.error_for_status()?.json()?;
        info!("Fetched {} repositories from GitHub for {}", repos.len(), user);
        Ok(repos)
    }
}
