//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::enrichment::Explanation;
use crate::core::frame::{Book, Frame};
use crate::core::state::App;
use crate::remote::{EnrichmentProvider, RemoteError};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopRecommender;

#[async_trait]
impl EnrichmentProvider for NoopRecommender {
    fn name(&self) -> &str {
        "noop"
    }

    async fn fetch_explanation(
        &self,
        _query: &str,
        _book: &Book,
        _match_score: f64,
    ) -> Result<Explanation, RemoteError> {
        Err(RemoteError::Config("noop provider".to_string()))
    }

    async fn fetch_related(
        &self,
        _title: &str,
        _top_k: usize,
    ) -> Result<Vec<Frame>, RemoteError> {
        Ok(Vec::new())
    }

    async fn search(&self, _query: &str, _top_k: usize) -> Result<Vec<Frame>, RemoteError> {
        Ok(Vec::new())
    }
}

/// Creates a test App with a NoopRecommender.
pub fn test_app() -> App {
    App::new(Arc::new(NoopRecommender), 12)
}

/// Creates a frame with a single-author book titled `title`.
pub fn test_frame(title: &str) -> Frame {
    Frame::new(
        Book {
            id: format!("id-{title}"),
            title: title.to_string(),
            authors: vec!["Frank Herbert".to_string()],
            description: Some(format!("A book called {title}.")),
            genres: vec!["Science Fiction".to_string()],
        },
        0.8,
    )
}
