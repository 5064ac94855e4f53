//! # TUI Components
//!
//! Components follow two patterns, both borrowed-props based:
//!
//! - **Stateless**: receive everything as parameters at render time.
//! - **Stateful**: persistent state lives in `TuiState`, data is borrowed
//!   from `App` per frame, and `handle_event` returns a high-level event
//!   for the run loop to translate into a core `Action`.
//!
//! Each component file co-locates its state type, event type, rendering,
//! event handling, and tests.

pub mod detail_panel;
pub mod results_list;
pub mod search_box;

pub use detail_panel::{DetailPanelState, PanelEvent};
pub use results_list::{ResultsEvent, ResultsListState};
pub use search_box::{SearchBox, SearchEvent};
