//! HTTP implementation of [`EnrichmentProvider`] against the DeepShelf
//! recommendation service.
//!
//! Endpoints used:
//! - `POST /recommend/query` — free-text search
//! - `POST /recommend/title` — related books for drill-down
//! - `POST /explain`         — explanation for one recommendation
//!
//! A 404 from `/recommend/title` means nothing cleared the similarity
//! threshold for that title; that is an empty related list, not an error.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::enrichment::Explanation;
use crate::core::frame::{Book, Frame};
use crate::remote::provider::{EnrichmentProvider, RemoteError};
use crate::remote::types::{
    ApiErrorBody, ExplainRequest, ExplainResponse, RecommendByQueryRequest,
    RecommendByTitleRequest, RecommendationResult,
};

pub struct HttpRecommender {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecommender {
    /// Creates a new client for the service at `base_url`.
    ///
    /// A builder failure (malformed TLS backend, bad timeout) falls back
    /// to the default client so construction stays infallible.
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using default: {e}");
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        debug!("{} response status: {}", path, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            // The service wraps error messages as {"detail": "..."}.
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.detail)
                .unwrap_or(text);
            warn!("API error from {path}: {status} - {message}");
            return Err(RemoteError::Api { status, message });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))
    }
}

#[async_trait]
impl EnrichmentProvider for HttpRecommender {
    fn name(&self) -> &str {
        "deepshelf-http"
    }

    async fn fetch_explanation(
        &self,
        query: &str,
        book: &Book,
        match_score: f64,
    ) -> Result<Explanation, RemoteError> {
        let request = ExplainRequest {
            query_text: query.to_string(),
            recommended_book: book.clone(),
            similarity_score: match_score.clamp(0.0, 1.0),
        };
        let response: ExplainResponse = self.post_json("/explain", &request).await?;
        Ok(Explanation {
            summary: response.summary,
            confidence: response.confidence,
            matching_features: response.matching_features,
            details: response.details,
        })
    }

    async fn fetch_related(
        &self,
        title: &str,
        top_k: usize,
    ) -> Result<Vec<Frame>, RemoteError> {
        let request = RecommendByTitleRequest {
            title: title.to_string(),
            top_k,
        };
        match self
            .post_json::<_, Vec<RecommendationResult>>("/recommend/title", &request)
            .await
        {
            Ok(results) => Ok(results.into_iter().map(Frame::from).collect()),
            // Unknown title / nothing above threshold: valid empty result.
            Err(RemoteError::Api { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<Frame>, RemoteError> {
        let request = RecommendByQueryRequest {
            query: query.to_string(),
            top_k,
        };
        let results: Vec<RecommendationResult> =
            self.post_json("/recommend/query", &request).await?;
        Ok(results.into_iter().map(Frame::from).collect())
    }
}
