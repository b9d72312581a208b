// Screen layout.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Standings table (fill)                            |
// +--------------------------------------------------+
// | Diagnostic line (1 row)                           |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub status_bar: Rect,
    pub table: Rect,
    pub diagnostic: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> BoardLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(3),    // table
            Constraint::Length(1), // diagnostic
            Constraint::Length(1), // help bar
        ])
        .split(area);

    BoardLayout {
        status_bar: vertical[0],
        table: vertical[1],
        diagnostic: vertical[2],
        help_bar: vertical[3],
    }
}

/// Number of data rows that fit in the table area (borders and header
/// excluded).
pub fn visible_rows(table: Rect) -> usize {
    table.height.saturating_sub(3) as usize
}
