//! # Application State
//!
//! Core business state for shelfdive. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn EnrichmentProvider>  // recommendation service
//! ├── query: Option<String>          // originating search query
//! ├── results: Vec<Frame>            // search results list
//! ├── searching: bool                // waiting on /recommend/query
//! ├── nav: NavStack                  // detail-panel drill-down stack
//! ├── enrichment: EnrichmentState    // current frame's explanation/related
//! ├── token: FrameToken              // staleness tag for in-flight fetches
//! ├── entry_recorded: bool           // one host-history entry per episode
//! ├── status_message: String         // status bar text
//! └── top_k: usize                   // result count per request
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::core::enrichment::{EnrichmentState, FrameToken};
use crate::core::frame::Frame;
use crate::core::nav::NavStack;
use crate::remote::EnrichmentProvider;

pub struct App {
    pub provider: Arc<dyn EnrichmentProvider>,
    /// The search query this episode originated from. Drill-down frames
    /// carry no query of their own; enrichment falls back to the frame's
    /// title when this is absent or blank.
    pub query: Option<String>,
    pub results: Vec<Frame>,
    pub searching: bool,
    pub nav: NavStack,
    pub enrichment: EnrichmentState,
    /// Bumped on every navigation. Enrichment results arriving with an
    /// older token are dropped instead of corrupting the current frame.
    pub token: FrameToken,
    /// True while the host holds the synthetic history entry for this
    /// panel-open episode. Drilling deeper never records a second one.
    pub entry_recorded: bool,
    pub status_message: String,
    pub top_k: usize,
}

impl App {
    pub fn new(provider: Arc<dyn EnrichmentProvider>, top_k: usize) -> Self {
        Self {
            provider,
            query: None,
            results: Vec::new(),
            searching: false,
            nav: NavStack::new(),
            enrichment: EnrichmentState::default(),
            token: FrameToken::default(),
            entry_recorded: false,
            status_message: String::from("Search for a book to get started"),
            top_k,
        }
    }

    /// The context string enrichment requests are issued with: the
    /// originating query, or the given title when no query is in context.
    pub fn context_query_for(&self, title: &str) -> String {
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => title.to_string(),
        }
    }
}
