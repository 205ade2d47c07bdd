//! Error types for article search.
//!
//! Every failure is terminal for the `search` call that produced it; the
//! client never retries. Incomplete article records are not errors at all:
//! they are dropped during decoding (see [`crate::models`]).

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Error types for search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// The keyword is blank or cannot be placed in a query string.
    /// Raised before any network I/O.
    #[error("Invalid search keyword: {0}")]
    InvalidKeyword(String),

    /// Transport failure, timeout, unreadable body, or a non-2xx status
    /// (including rejected API keys).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body is not JSON or does not have the expected top-level shape.
    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Bad base URL, missing API key, unreadable config file.
    /// Only produced while building a client.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// HTTP status attached to a `Network` error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Whether a `Decode` error was caused by a body that ended early.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        match self {
            SearchError::Decode(e) => crate::utils::looks_truncated(e),
            _ => false,
        }
    }
}
