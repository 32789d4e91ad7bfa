//! Network layer for the content refreshers.
//!
//! This module provides:
//! - The [`Fetcher`] seam every refresher talks through
//! - A reqwest-backed [`HttpClient`] with rate limit awareness
//! - GitHub repository listing

mod client;
mod github;
mod web_source;

pub use client::{extract_domain, HttpClient, RateLimitState};
pub use github::{default_repos_api, user_repos_url, GitHubClient};
pub use web_source::{DynFetcher, FetchResponse, Fetcher};
