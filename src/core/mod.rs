//! # Core Application Logic
//!
//! This module contains shelfdive's business logic: the drill-down
//! navigation stack, per-frame enrichment state, and the reducer that
//! ties them together. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`frame`]: `Book` and `Frame` value objects
//! - [`nav`]: the navigation stack (open / drill / back / close)
//! - [`enrichment`]: per-frame explanation + related-items state
//! - [`state`]: the `App` struct — all application state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: TOML config file handling

pub mod action;
pub mod config;
pub mod enrichment;
pub mod frame;
pub mod nav;
pub mod state;
