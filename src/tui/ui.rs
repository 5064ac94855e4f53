use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(3), Min(0), Length(1)]);
    let [search_area, main_area, status_area] = layout.areas(frame.area());

    // Search box is dimmed (and loses the cursor) while a panel is open
    tui.search_box.dimmed = app.nav.is_open();
    tui.search_box.render(frame, search_area);

    // Main area - detail panel when open, otherwise the results list
    if let Some(current) = &app.nav.current {
        tui.detail_panel.render(
            frame,
            main_area,
            current,
            &app.enrichment,
            app.nav.history.len(),
        );
    } else if app.results.is_empty() {
        let hint = if app.searching {
            "Searching..."
        } else {
            "Type a query and press Enter — e.g. \"epic fantasy with dragons\""
        };
        let placeholder = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(placeholder, main_area);
    } else {
        tui.results_list.render(frame, main_area, &app.results);
    }

    // Status bar
    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.status_message),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(status, status_area);
}
