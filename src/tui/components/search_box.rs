//! # Search Box Component
//!
//! One-line query input at the top of the screen. This is the thin
//! list-level search flow: buffer characters, emit `Submit` on Enter.
//! No state machine, no history.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct SearchBox {
    pub buffer: String,
    /// Dimmed while the detail panel has focus.
    pub dimmed: bool,
}

/// Events emitted by the search box.
pub enum SearchEvent {
    Submit(String),
}

impl SearchBox {
    pub fn new(initial_query: Option<String>) -> Self {
        Self {
            buffer: initial_query.unwrap_or_default(),
            dimmed: false,
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            TuiEvent::Submit => {
                let query = self.buffer.trim().to_string();
                (!query.is_empty()).then(|| SearchEvent::Submit(query))
            }
            _ => None,
        }
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.dimmed {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled("? ", Style::default().fg(Color::Cyan)),
            Span::raw(self.buffer.as_str()),
        ]);
        let input = Paragraph::new(line)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(" Search "));
        frame.render_widget(input, area);

        if !self.dimmed {
            // Place the cursor after the typed text
            let x = area.x + 3 + self.buffer.chars().count() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}
