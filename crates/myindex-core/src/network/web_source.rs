//! Fetcher trait: the seam between refreshers and the network.
//!
//! Refreshers never talk to `reqwest` directly. They ask a [`Fetcher`] for a
//! URL and get back a fully-read [`FetchResponse`], which keeps the
//! fallback logic independent of the HTTP stack and lets tests script
//! responses per URL.

use crate::{MyIndexError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A completed HTTP exchange with the body already read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Final URL of the request.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into [`MyIndexError::HttpStatus`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MyIndexError::HttpStatus {
                url: self.url,
                status: self.status,
            })
        }
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| MyIndexError::Json {
            message: format!("Unexpected payload from {}: {}", self.url, e),
            source: Some(e),
        })
    }

    /// The body as text.
    pub fn text(&self) -> &str {
        &self.body
    }
}

/// Something that can GET a URL.
///
/// Implementations report connection failures as errors and return every
/// answered request as a [`FetchResponse`], whatever its status; callers
/// decide what a non-success status means for them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchResponse>;
}

/// Shared, type-erased fetcher.
pub type DynFetcher = Arc<dyn Fetcher>;
