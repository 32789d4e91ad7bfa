//! HTTP client with rate limiting awareness.
//!
//! Provides a wrapper around reqwest with:
//! - Per-host rate limit tracking from `X-RateLimit-*` response headers
//! - A short throttle delay when a host's limit is nearly spent
//! - An optional request timeout (none by default)
//! - User-agent management

use crate::config::{AppConfig, NetworkConfig};
use crate::network::web_source::{FetchResponse, Fetcher};
use crate::{MyIndexError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, Response, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Rate limit state extracted from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitState {
    /// Remaining requests allowed.
    pub remaining: Option<u64>,
    /// Total request limit.
    pub limit: Option<u64>,
    /// Unix timestamp when the rate limit resets.
    pub reset: Option<u64>,
}

impl RateLimitState {
    fn from_response(response: &Response) -> Self {
        let headers = response.headers();
        let parse = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
        };
        Self {
            remaining: parse("X-RateLimit-Remaining"),
            limit: parse("X-RateLimit-Limit"),
            reset: parse("X-RateLimit-Reset"),
        }
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_none() && self.limit.is_none() && self.reset.is_none()
    }

    /// Whether the reported window has already ended at `now` (unix seconds).
    pub fn is_expired(&self, now: u64) -> bool {
        self.reset.is_some_and(|reset| reset <= now)
    }

    /// Check if we should throttle requests at `now` (unix seconds).
    pub fn should_throttle(&self, now: u64) -> bool {
        if self.is_expired(now) {
            return false;
        }
        match (self.remaining, self.limit) {
            (Some(remaining), Some(limit)) if limit > 0 => {
                // Throttle when below 10% of limit
                let threshold = (limit as f64 * 0.1) as u64;
                remaining < threshold.max(1)
            }
            _ => false,
        }
    }
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// HTTP client with rate limiting awareness.
pub struct HttpClient {
    client: Client,
    rate_limits: Mutex<HashMap<String, RateLimitState>>,
    timeout: Option<Duration>,
    throttle_delay: Duration,
}

impl HttpClient {
    /// Create a new HTTP client without a request timeout.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a new HTTP client with a request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(AppConfig::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| MyIndexError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(e),
        })?;

        Ok(Self {
            client,
            rate_limits: Mutex::new(HashMap::new()),
            timeout,
            throttle_delay: NetworkConfig::THROTTLE_DELAY,
        })
    }

    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Get the last rate limit state reported by `host`.
    pub fn rate_limit_state(&self, host: &str) -> RateLimitState {
        let limits = self.rate_limits.lock().unwrap_or_else(|e| e.into_inner());
        limits.get(host).cloned().unwrap_or_default()
    }

    /// Make a GET request with custom headers.
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let host = extract_domain(url);
        if let Some(delay) = self.throttle_delay_for(&host, unix_now()) {
            tokio::time::sleep(delay).await;
        }

        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MyIndexError::Timeout {
                    url: url.to_string(),
                }
            } else {
                MyIndexError::Network {
                    message: format!("GET {} failed: {}", url, e),
                    source: Some(e),
                }
            }
        })?;

        self.record_rate_limit(&host, RateLimitState::from_response(&response));
        Self::check_response_status(response, url)
    }

    // Entries whose window has ended are dropped here
    fn throttle_delay_for(&self, host: &str, now: u64) -> Option<Duration> {
        let mut limits = self.rate_limits.lock().unwrap_or_else(|e| e.into_inner());
        let state = limits.get(host)?;
        if state.is_expired(now) {
            debug!("Rate limit window for {} has reset", host);
            limits.remove(host);
            return None;
        }
        if !state.should_throttle(now) {
            return None;
        }
        warn!(
            "Rate limit approaching for {} (remaining: {:?}/{:?}), throttling for {:?}",
            host, state.remaining, state.limit, self.throttle_delay
        );
        Some(self.throttle_delay)
    }

    fn record_rate_limit(&self, host: &str, reported: RateLimitState) {
        if reported.is_empty() {
            return;
        }
        let mut limits = self.rate_limits.lock().unwrap_or_else(|e| e.into_inner());
        let state = limits.entry(host.to_string()).or_default();
        state.remaining = reported.remaining.or(state.remaining);
        state.limit = reported.limit.or(state.limit);
        state.reset = reported.reset.or(state.reset);
        if let (Some(remaining), Some(limit)) = (state.remaining, state.limit) {
            debug!("Rate limit for {}: {}/{}", host, remaining, limit);
        }
    }

    fn check_response_status(response: Response, url: &str) -> Result<Response> {
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());

            return Err(MyIndexError::RateLimited {
                service: extract_domain(url),
                retry_after_secs: retry_after,
            });
        }

        // Other statuses are returned; the caller decides what they mean
        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        let headers: &[(&str, &str)] = if extract_domain(url) == "api.github.com" {
            &[("Accept", NetworkConfig::GITHUB_ACCEPT)]
        } else {
            &[]
        };

        debug!("GET {}", url);
        let response = self.get_with_headers(url, headers).await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(|e| MyIndexError::Network {
            message: format!("Failed to read body from {}: {}", url, e),
            source: Some(e),
        })?;

        Ok(FetchResponse::new(final_url, status, body))
    }
}

/// Extract domain from a URL.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.host_str().unwrap_or("unknown").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
