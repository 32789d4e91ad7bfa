//! Error types for MyIndex.
//!
//! Every failure a refresher can hit falls into one of three buckets: the
//! request never completed (`Network`, `Timeout`, `RateLimited`), the server
//! answered with a non-success status (`HttpStatus`), or the payload did not
//! have the expected shape (`Json`).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the MyIndex library.
#[derive(Debug, Error)]
pub enum MyIndexError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Rate limited by {service}, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        service: String,
        retry_after_secs: Option<u64>,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for MyIndex operations.
pub type Result<T> = std::result::Result<T, MyIndexError>;

impl From<std::io::Error> for MyIndexError {
    fn from(err: std::io::Error) -> Self {
        MyIndexError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for MyIndexError {
    fn from(err: serde_json::Error) -> Self {
        MyIndexError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for MyIndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MyIndexError::Timeout {
                url: err
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            }
        } else {
            MyIndexError::Network {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl MyIndexError {
    /// Convert to a JSON-RPC error code.
    ///
    /// Custom error codes (application-defined, -32000 to -32099):
    /// - -32000: Network/connectivity error (including HTTP status failures)
    /// - -32005: Validation error
    ///
    /// Standard codes used:
    /// - -32602: Invalid params
    /// - -32603: Internal error
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            MyIndexError::Network { .. }
            | MyIndexError::Timeout { .. }
            | MyIndexError::RateLimited { .. }
            | MyIndexError::HttpStatus { .. } => -32000,

            MyIndexError::Validation { .. } => -32005,

            MyIndexError::InvalidParams { .. } => -32602,

            _ => -32603,
        }
    }
}
