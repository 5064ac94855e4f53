//! # Frame Enrichment
//!
//! Every frame shown in the detail panel gets two asynchronous
//! enrichments: an explanation of why the book matched, and a list of
//! related books for further drill-down. The two fetches are independent
//! — each commits its result and clears its own loading flag without
//! waiting for the other.
//!
//! Results are tagged with the [`FrameToken`] in force when the fetch was
//! issued. Navigating bumps the token, so a slow fetch for an abandoned
//! frame arrives with a stale token and is dropped instead of being
//! written into a state that now belongs to a different frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::frame::Frame;

/// Identity tag for one enrichment round. Bumped on every navigation;
/// results carrying an old token are discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameToken(pub u64);

impl FrameToken {
    pub fn next(self) -> Self {
        FrameToken(self.0 + 1)
    }
}

/// Why a book was recommended, as returned by the explanation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Explanation {
    /// Short natural-language summary.
    pub summary: String,
    /// Confidence label ("LOW" through "VERY HIGH").
    pub confidence: String,
    /// Human-readable features that matched (may be empty).
    #[serde(default)]
    pub matching_features: Vec<String>,
    /// Named factors and their contribution as integer percentages.
    #[serde(default)]
    pub details: BTreeMap<String, u8>,
}

/// Enrichment data for the frame currently on screen. Fully replaced,
/// never merged, on every navigation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnrichmentState {
    /// `None` while loading or after a failed fetch.
    pub explanation: Option<Explanation>,
    /// Candidate frames for further drill-down. Empty is a valid result.
    pub related: Vec<Frame>,
    /// True exactly while the explanation fetch is outstanding.
    pub explaining: bool,
    /// True exactly while the related-items fetch is outstanding.
    pub loading_related: bool,
}

impl EnrichmentState {
    /// Resets to "both loading, no data". Called the instant a frame
    /// becomes current, before the fetches are spawned.
    pub fn begin(&mut self) {
        *self = EnrichmentState {
            explanation: None,
            related: Vec::new(),
            explaining: true,
            loading_related: true,
        };
    }

    /// Clears everything, including loading flags. Used on panel close.
    pub fn clear(&mut self) {
        *self = EnrichmentState::default();
    }

    /// Commits the explanation outcome. A failed fetch leaves the field
    /// absent; the panel renders a "could not generate" line for that.
    pub fn commit_explanation(&mut self, outcome: Option<Explanation>) {
        self.explanation = outcome;
        self.explaining = false;
    }

    /// Commits the related-items outcome. Failure and an empty result are
    /// the same terminal state: an empty grid, no error banner.
    pub fn commit_related(&mut self, outcome: Vec<Frame>) {
        self.related = outcome;
        self.loading_related = false;
    }
}
