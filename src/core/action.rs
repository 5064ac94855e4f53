//! # Actions
//!
//! Everything that can happen in shelfdive becomes an `Action`.
//! User clicks a result card? That's `Action::OpenFrame`.
//! The explanation service responds? That's `Action::ExplanationReady`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state and returns an `Effect` describing the I/O
//! the caller must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the navigation stack and the staleness rule testable
//! without a terminal or a network: feed actions, assert on state.

use log::{debug, warn};

use crate::core::enrichment::{Explanation, FrameToken};
use crate::core::frame::Frame;
use crate::core::state::App;
use crate::remote::RemoteError;

#[derive(Debug)]
pub enum Action {
    /// Search query submitted from the search box.
    SubmitQuery(String),
    /// The search request resolved (thin list-level flow, no state machine).
    SearchReady(Result<Vec<Frame>, RemoteError>),
    /// A result card was selected: open its detail panel.
    OpenFrame(Frame),
    /// A related item inside the open panel was selected.
    DrillInto(Frame),
    /// In-panel back affordance: unwind one drill-down step.
    GoBack,
    /// Explicit dismissal of the panel (close button). The host's
    /// history entry must be unwound to stay in lockstep.
    Dismiss,
    /// The host's native back action fired. The host has already
    /// consumed its entry; the whole episode collapses.
    NativeBack,
    /// The explanation fetch for `token` resolved.
    ExplanationReady {
        token: FrameToken,
        outcome: Result<Explanation, RemoteError>,
    },
    /// The related-items fetch for `token` resolved.
    RelatedReady {
        token: FrameToken,
        outcome: Result<Vec<Frame>, RemoteError>,
    },
    Quit,
}

/// I/O the event loop must perform after an `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Issue the search request and feed the outcome back as `SearchReady`.
    SpawnSearch { query: String, top_k: usize },
    /// Spawn the two enrichment fetches for `frame`, tagged with `token`.
    /// When `record_entry` is set this navigation begins a panel-open
    /// episode and the host must record its one synthetic history entry.
    Enrich {
        frame: Frame,
        context_query: String,
        token: FrameToken,
        record_entry: bool,
    },
    /// Programmatically trigger the host's back action so the recorded
    /// entry is consumed along with the panel.
    UnwindEntry,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::SubmitQuery(query) => {
            let query = query.trim().to_string();
            if query.is_empty() {
                return Effect::None;
            }
            app.query = Some(query.clone());
            app.searching = true;
            app.status_message = format!("Searching for '{query}'...");
            Effect::SpawnSearch {
                query,
                top_k: app.top_k,
            }
        }

        Action::SearchReady(outcome) => {
            app.searching = false;
            match outcome {
                Ok(frames) => {
                    app.status_message = format!("Found {} matches", frames.len());
                    app.results = frames;
                }
                Err(e) => {
                    warn!("Search failed: {e}");
                    app.status_message = format!("Search failed: {e}");
                }
            }
            Effect::None
        }

        Action::OpenFrame(frame) => {
            app.nav.open(frame.clone());
            // Idempotent with respect to the host entry: re-opening while
            // a panel is already open must not record a duplicate.
            let record_entry = !app.entry_recorded;
            app.entry_recorded = true;
            begin_enrichment(app, frame)
                .with_record_entry(record_entry)
        }

        Action::DrillInto(frame) => match app.nav.drill_into(frame.clone()) {
            Ok(()) => begin_enrichment(app, frame),
            Err(e) => {
                warn!("Ignoring drill-down in invalid state: {e}");
                Effect::None
            }
        },

        Action::GoBack => {
            if app.nav.go_back()
                && let Some(frame) = app.nav.current.clone()
            {
                begin_enrichment(app, frame)
            } else {
                // Guarded no-op: the UI only offers back when history is
                // non-empty, so there is nothing to do here.
                Effect::None
            }
        }

        Action::Dismiss => {
            if !app.nav.is_open() {
                return Effect::None;
            }
            close_episode(app);
            Effect::UnwindEntry
        }

        Action::NativeBack => {
            // The host already unwound its entry; unwinding again here
            // would eat an unrelated history entry.
            close_episode(app);
            Effect::None
        }

        Action::ExplanationReady { token, outcome } => {
            if token != app.token || !app.nav.is_open() {
                debug!("Dropping stale explanation result (token {:?})", token);
                return Effect::None;
            }
            match outcome {
                Ok(explanation) => app.enrichment.commit_explanation(Some(explanation)),
                Err(e) => {
                    warn!("Explanation fetch failed: {e}");
                    app.enrichment.commit_explanation(None);
                }
            }
            Effect::None
        }

        Action::RelatedReady { token, outcome } => {
            if token != app.token || !app.nav.is_open() {
                debug!("Dropping stale related-items result (token {:?})", token);
                return Effect::None;
            }
            match outcome {
                Ok(frames) => app.enrichment.commit_related(frames),
                Err(e) => {
                    // Rendered as an empty grid, not an error banner.
                    warn!("Related-items fetch failed: {e}");
                    app.enrichment.commit_related(Vec::new());
                }
            }
            Effect::None
        }
    }
}

/// Common tail of every navigation: bump the staleness token, reset the
/// enrichment state to loading, and ask the loop to spawn the fetches.
fn begin_enrichment(app: &mut App, frame: Frame) -> Effect {
    app.token = app.token.next();
    app.enrichment.begin();
    app.status_message = frame.book.title.clone();
    Effect::Enrich {
        context_query: app.context_query_for(&frame.book.title),
        token: app.token,
        frame,
        record_entry: false,
    }
}

fn close_episode(app: &mut App) {
    app.nav.close_all();
    app.enrichment.clear();
    // In-flight fetches for the closed episode become stale immediately.
    app.token = app.token.next();
    app.entry_recorded = false;
    app.status_message = match app.results.len() {
        0 => String::from("Search for a book to get started"),
        n => format!("Found {n} matches"),
    };
}

impl Effect {
    fn with_record_entry(self, record_entry: bool) -> Effect {
        match self {
            Effect::Enrich {
                frame,
                context_query,
                token,
                ..
            } => Effect::Enrich {
                frame,
                context_query,
                token,
                record_entry,
            },
            other => other,
        }
    }
}
