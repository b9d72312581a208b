// Status bar, diagnostic line and help bar.

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use standings_core::sort::{Column, Direction, SortState};

use crate::ViewState;

pub const HELP_TEXT: &str =
    " q:Quit | 1-9,0:Sort column | w/l:Wins/Losses | click header:Sort | r:Reload | j/k:Scroll";

/// Render the top status bar.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        status_text(state),
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Render the most recent diagnostic, or nothing.
pub fn render_diagnostic(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(diagnostic) = &state.last_diagnostic else {
        return;
    };
    let text = format!(
        " {} {}",
        diagnostic.at.format("%H:%M:%S"),
        diagnostic.message
    );
    let paragraph = Paragraph::new(Span::styled(text, Style::default().fg(Color::Red)));
    frame.render_widget(paragraph, area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        HELP_TEXT,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn status_text(state: &ViewState) -> String {
    let mut text = format!(
        " {} | {} teams | Sort: {} | Updated: {}",
        state.source_url,
        state.rows.len(),
        sort_summary(&state.sort),
        format_loaded_at(state.loaded_at)
    );
    if state.loading {
        text.push_str(" | Loading...");
    }
    text
}

/// Human-readable active sort, e.g. `Wins ▼`.
pub fn sort_summary(sort: &SortState) -> String {
    let Some(key) = sort.column.as_deref() else {
        return "none".to_string();
    };
    let arrow = match sort.direction {
        Direction::Ascending => "▲",
        Direction::Descending => "▼",
    };
    match Column::from_key(key) {
        Some(column) => format!("{} {arrow}", column.title()),
        None => format!("{key} (unknown)"),
    }
}

fn format_loaded_at(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "--".to_string())
}
