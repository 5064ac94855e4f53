//! # Detail Panel Component
//!
//! The drill-down panel for the current frame: book header, the "why
//! this book" explanation, and the related-items list. The two
//! enrichment sections render their loading states independently — a
//! slow explanation never holds up the related list.
//!
//! Failure rendering per section:
//! - explanation failed → a "could not generate" line
//! - related failed     → an empty grid, no error banner

use ratatui::Frame as TerminalFrame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::core::enrichment::EnrichmentState;
use crate::core::frame::Frame;
use crate::tui::event::TuiEvent;

/// Persistent state for the detail panel: which related item is selected.
/// Reset on every navigation so selection never leaks across frames.
pub struct DetailPanelState {
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the detail panel.
pub enum PanelEvent {
    /// Drill into the related item at this index.
    Drill(usize),
    /// Unwind one drill-down step (Left arrow).
    Back,
    /// Explicit dismissal (`q`). Closes the episode and programmatically
    /// unwinds the host's history entry.
    Dismiss,
}

impl Default for DetailPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailPanelState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Handle a key event against `related_len` drill-down candidates.
    pub fn handle_event(&mut self, event: &TuiEvent, related_len: usize) -> Option<PanelEvent> {
        match event {
            TuiEvent::BackStep => Some(PanelEvent::Back),
            TuiEvent::InputChar('q') => Some(PanelEvent::Dismiss),
            TuiEvent::CursorUp | TuiEvent::ScrollUp if related_len > 0 => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown if related_len > 0 => {
                self.selected = (self.selected + 1).min(related_len - 1);
                None
            }
            TuiEvent::Submit if related_len > 0 => {
                Some(PanelEvent::Drill(self.selected.min(related_len - 1)))
            }
            _ => None,
        }
    }

    /// Render the panel for `current`, with `history_len` frames behind it.
    pub fn render(
        &mut self,
        frame: &mut TerminalFrame,
        area: Rect,
        current: &Frame,
        enrichment: &EnrichmentState,
        history_len: usize,
    ) {
        use Constraint::{Length, Min};

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", current.book.title))
            .title_bottom(footer_hint(history_len));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_height = header_lines(current, inner.width).len() as u16;
        let layout = Layout::vertical([Length(header_height), Min(4), Length(8)]);
        let [header_area, explain_area, related_area] = layout.areas(inner);

        let header = Paragraph::new(header_lines(current, inner.width));
        frame.render_widget(header, header_area);

        self.render_explanation(frame, explain_area, enrichment);
        self.render_related(frame, related_area, enrichment);
    }

    fn render_explanation(
        &self,
        frame: &mut TerminalFrame,
        area: Rect,
        enrichment: &EnrichmentState,
    ) {
        let mut lines: Vec<Line> = vec![Line::from(Span::styled(
            "Why this book?",
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        if enrichment.explaining {
            lines.push(Line::from(Span::styled(
                "Generating explanation...",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            match &enrichment.explanation {
                Some(explanation) => {
                    for wrapped in
                        textwrap::wrap(&explanation.summary, area.width.max(20) as usize - 2)
                    {
                        lines.push(Line::from(wrapped.into_owned()));
                    }
                    lines.push(Line::from(vec![
                        Span::styled("Confidence: ", Style::default().fg(Color::DarkGray)),
                        Span::raw(explanation.confidence.clone()),
                    ]));
                    for (factor, pct) in &explanation.details {
                        lines.push(Line::from(vec![
                            Span::styled(
                                format!("  {factor}: "),
                                Style::default().fg(Color::DarkGray),
                            ),
                            Span::raw(format!("{pct}%")),
                        ]));
                    }
                }
                None => {
                    lines.push(Line::from(Span::styled(
                        "Could not generate an explanation for this match.",
                        Style::default().fg(Color::Yellow),
                    )));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_related(
        &mut self,
        frame: &mut TerminalFrame,
        area: Rect,
        enrichment: &EnrichmentState,
    ) {
        let title = if enrichment.loading_related {
            " Related books (loading...) "
        } else {
            " Related books "
        };
        let block = Block::default().borders(Borders::TOP).title(title);

        // Empty after loading is a valid terminal state; the grid just
        // stays empty, no error banner.
        let items: Vec<ListItem> = enrichment
            .related
            .iter()
            .map(|f| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3}% ", f.match_percent()),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(f.book.title.clone()),
                ]))
            })
            .collect();

        if enrichment.related.is_empty() {
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(enrichment.related.len() - 1);
            self.list_state.select(Some(self.selected));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn header_lines(current: &Frame, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}% match", current.match_percent()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {}", current.book.author_line()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {}", current.book.genres.join(", ")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if let Some(description) = &current.book.description {
        for wrapped in textwrap::wrap(description, width.max(20) as usize - 2)
            .into_iter()
            .take(3)
        {
            lines.push(Line::from(wrapped.into_owned()));
        }
    }
    lines.push(Line::default());
    lines
}

fn footer_hint(history_len: usize) -> Line<'static> {
    // The back affordance is only shown when there is a step to unwind.
    let hint = if history_len > 0 {
        " ← back · Enter drill in · q close "
    } else {
        " Enter drill in · q close "
    };
    Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
}
