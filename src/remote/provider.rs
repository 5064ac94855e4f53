use std::fmt;

use async_trait::async_trait;

use crate::core::enrichment::Explanation;
use crate::core::frame::{Book, Frame};

/// Errors that can occur talking to the recommendation service.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum RemoteError {
    /// Provider misconfigured (bad base URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the service's response. Not retryable.
    Parse(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Config(msg) => write!(f, "config error: {msg}"),
            RemoteError::Network(msg) => write!(f, "network error: {msg}"),
            RemoteError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RemoteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// The recommendation service as seen by the navigation core: searches,
/// explanations, and related-item lookups. All failures come back as
/// `Err(RemoteError)` — nothing here panics into the navigation logic.
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Explain why `book` matched the context query.
    async fn fetch_explanation(
        &self,
        query: &str,
        book: &Book,
        match_score: f64,
    ) -> Result<Explanation, RemoteError>;

    /// Books similar to the given title, for drill-down. An unknown title
    /// or nothing above the similarity threshold is an empty list, not an
    /// error.
    async fn fetch_related(&self, title: &str, top_k: usize)
        -> Result<Vec<Frame>, RemoteError>;

    /// Free-text recommendation search (the list-level flow).
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Frame>, RemoteError>;
}
