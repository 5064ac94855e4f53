//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It is
//! also where the host-history lockstep happens: the run loop owns the
//! [`history::TerminalHistory`] and mirrors the reducer's effects onto it
//! — `record_entry` when an episode opens, `go_back` when the user
//! dismisses, and the Esc gesture consumes the entry *before* the core
//! hears `Action::NativeBack` (the same ordering a browser gives a
//! popstate listener).
//!
//! ## Redraw Strategy
//!
//! Conditional redraw: while a fetch is outstanding the loop polls every
//! ~80ms so loading indicators stay fresh; idle, it sleeps up to 500ms
//! and only redraws on events or resize.

pub mod component;
pub mod components;
pub mod event;
pub mod history;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::enrichment::FrameToken;
use crate::core::frame::Frame;
use crate::core::state::App;
use crate::remote::{EnrichmentProvider, HttpRecommender};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailPanelState, PanelEvent, ResultsEvent, ResultsListState, SearchBox, SearchEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::history::{HostHistory, TerminalHistory};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub results_list: ResultsListState,
    pub detail_panel: DetailPanelState,
}

impl TuiState {
    pub fn new(initial_query: Option<String>) -> Self {
        Self {
            search_box: SearchBox::new(initial_query),
            results_list: ResultsListState::new(),
            detail_panel: DetailPanelState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the recommendation provider from the resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn EnrichmentProvider> {
    Arc::new(HttpRecommender::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.timeout_secs),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::new(provider, config.top_k);
    let mut tui = TuiState::new(config.default_query.clone());
    let mut host = TerminalHistory::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Kick off the startup query, if one was configured
    if let Some(query) = config.default_query {
        let effect = update(&mut app, Action::SubmitQuery(query));
        handle_effect(effect, &mut app, &mut tui, &mut host, &tx);
    }

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short poll while fetches are outstanding so loading text stays live
        let loading =
            app.searching || app.enrichment.explaining || app.enrichment.loading_related;
        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };

        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() || loading {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // Esc is the native back gesture while a panel is open: the
            // host consumes its entry first, then the core is told. With
            // no panel open, Esc quits.
            if matches!(event, TuiEvent::Escape) {
                if app.nav.is_open() {
                    host.go_back();
                    let effect = update(&mut app, Action::NativeBack);
                    if handle_effect(effect, &mut app, &mut tui, &mut host, &tx) {
                        should_quit = true;
                    }
                } else {
                    should_quit = true;
                }
                continue;
            }

            let action = if app.nav.is_open() {
                panel_action(&mut tui, &app, &event)
            } else {
                browse_action(&mut tui, &app, &event)
            };

            if let Some(action) = action {
                let effect = update(&mut app, action);
                if handle_effect(effect, &mut app, &mut tui, &mut host, &tx) {
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (search + enrichment results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            let effect = update(&mut app, action);
            if handle_effect(effect, &mut app, &mut tui, &mut host, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Translate a key event into a core action while the detail panel is open.
fn panel_action(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    let related_len = app.enrichment.related.len();
    match tui.detail_panel.handle_event(event, related_len)? {
        PanelEvent::Drill(idx) => app
            .enrichment
            .related
            .get(idx)
            .cloned()
            .map(Action::DrillInto),
        PanelEvent::Back => {
            // Only offered when there is a step to unwind; the reducer
            // no-ops otherwise.
            (!app.nav.history.is_empty()).then_some(Action::GoBack)
        }
        PanelEvent::Dismiss => Some(Action::Dismiss),
    }
}

/// Translate a key event into a core action while browsing results.
fn browse_action(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    // Enter re-submits when the buffer holds a new query; once the buffer
    // matches the query already searched, Enter opens the selection.
    let buffer_is_current_query =
        app.query.as_deref() == Some(tui.search_box.buffer.trim()) && !app.results.is_empty();

    if matches!(event, TuiEvent::Submit) && buffer_is_current_query {
        return match tui.results_list.handle_event(event, app.results.len())? {
            ResultsEvent::Open(idx) => app.results.get(idx).cloned().map(Action::OpenFrame),
        };
    }

    if matches!(
        event,
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::ScrollUp | TuiEvent::ScrollDown
    ) {
        let _ = tui.results_list.handle_event(event, app.results.len());
        return None;
    }

    match tui.search_box.handle_event(event)? {
        SearchEvent::Submit(query) => Some(Action::SubmitQuery(query)),
    }
}

/// Perform the I/O a reducer step asked for. Returns true on quit.
fn handle_effect(
    effect: Effect,
    app: &mut App,
    tui: &mut TuiState,
    host: &mut TerminalHistory,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::Quit => return true,
        Effect::SpawnSearch { query, top_k } => {
            spawn_search(app, query, top_k, tx.clone());
        }
        Effect::Enrich {
            frame,
            context_query,
            token,
            record_entry,
        } => {
            if record_entry {
                host.record_entry();
            }
            // Fresh frame, fresh selection
            tui.detail_panel = DetailPanelState::new();
            spawn_enrichment(app, frame, context_query, token, tx.clone());
        }
        Effect::UnwindEntry => host.go_back(),
        Effect::None => {}
    }
    false
}

fn spawn_search(app: &App, query: String, top_k: usize, tx: mpsc::Sender<Action>) {
    info!("Spawning search request for '{query}'");
    let provider = app.provider.clone();
    tokio::spawn(async move {
        let outcome = provider.search(&query, top_k).await;
        if tx.send(Action::SearchReady(outcome)).is_err() {
            warn!("Failed to send search result: receiver dropped");
        }
    });
}

/// Spawns the two enrichment fetches for `frame`, tagged with `token`.
/// The fetches are independent tasks — each result is committed (or
/// dropped as stale) on its own.
fn spawn_enrichment(
    app: &App,
    frame: Frame,
    context_query: String,
    token: FrameToken,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning enrichment for '{}' (token {:?})",
        frame.book.title, token
    );

    let provider = app.provider.clone();
    let book = frame.book.clone();
    let score = frame.match_score;
    let tx_explain = tx.clone();
    tokio::spawn(async move {
        let outcome = provider.fetch_explanation(&context_query, &book, score).await;
        if tx_explain
            .send(Action::ExplanationReady { token, outcome })
            .is_err()
        {
            warn!("Failed to send explanation result: receiver dropped");
        }
    });

    let provider = app.provider.clone();
    let title = frame.book.title.clone();
    let top_k = app.top_k;
    tokio::spawn(async move {
        let outcome = provider.fetch_related(&title, top_k).await;
        if tx.send(Action::RelatedReady { token, outcome }).is_err() {
            warn!("Failed to send related-items result: receiver dropped");
        }
    });
}
