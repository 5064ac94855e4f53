//! # Results List Component
//!
//! The search results as a selectable list. Selecting an entry emits
//! `Open`, which the run loop turns into `Action::OpenFrame` — the start
//! of a panel-open episode.
//!
//! Follows the persistent state + borrowed props pattern:
//! - `ResultsListState` lives in `TuiState`
//! - the frames are borrowed from `App` at render time

use ratatui::Frame as TerminalFrame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::frame::Frame;
use crate::tui::event::TuiEvent;

/// Persistent state for the results list.
pub struct ResultsListState {
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the results list.
pub enum ResultsEvent {
    /// Open the detail panel for the result at this index.
    Open(usize),
}

impl Default for ResultsListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Handle a key event against a list of `len` results.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) -> Option<ResultsEvent> {
        if len == 0 {
            return None;
        }
        self.selected = self.selected.min(len - 1);
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.selected = (self.selected + 1).min(len - 1);
                None
            }
            TuiEvent::Submit => Some(ResultsEvent::Open(self.selected)),
            _ => None,
        }
    }

    /// Render the given frames into `area`.
    pub fn render(&mut self, frame: &mut TerminalFrame, area: Rect, results: &[Frame]) {
        let items: Vec<ListItem> = results
            .iter()
            .map(|f| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3}% ", f.match_percent()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(
                        f.book.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", f.book.author_line()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        if results.is_empty() {
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(results.len() - 1);
            self.list_state.select(Some(self.selected));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Matches "))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
