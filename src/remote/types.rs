//! Wire types for the recommendation service's HTTP API.
//!
//! These mirror the service's request/response models; unknown response
//! fields (cover URLs and the like) are ignored on deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::frame::{Book, Frame};

/// Request body for `POST /recommend/query`.
#[derive(Serialize, Debug)]
pub struct RecommendByQueryRequest {
    pub query: String,
    pub top_k: usize,
}

/// Request body for `POST /recommend/title`.
#[derive(Serialize, Debug)]
pub struct RecommendByTitleRequest {
    pub title: String,
    pub top_k: usize,
}

/// One entry in a recommendation response.
#[derive(Deserialize, Debug)]
pub struct RecommendationResult {
    pub book: Book,
    pub similarity_score: f64,
}

impl From<RecommendationResult> for Frame {
    fn from(result: RecommendationResult) -> Self {
        Frame::new(result.book, result.similarity_score)
    }
}

/// Request body for `POST /explain`.
#[derive(Serialize, Debug)]
pub struct ExplainRequest {
    pub query_text: String,
    pub recommended_book: Book,
    pub similarity_score: f64,
}

/// Response body from `POST /explain`. `matching_features` is optional:
/// older service versions only send the summary, confidence and details.
#[derive(Deserialize, Debug)]
pub struct ExplainResponse {
    pub match_score: u8,
    pub confidence: String,
    pub summary: String,
    #[serde(default)]
    pub matching_features: Vec<String>,
    #[serde(default)]
    pub details: BTreeMap<String, u8>,
}

/// Error body the service returns for non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub detail: String,
}
