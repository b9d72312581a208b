// Standings table widget and header hit-testing.
//
// Header hit-testing solves the same horizontal layout the table uses, so a
// click maps to the cell actually drawn even when columns are squeezed.

use std::rc::Rc;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use standings_core::sort::{Column, Direction, SortState, DISPLAY_COLUMNS};

use crate::ViewState;

/// Width of each displayed column, in `DISPLAY_COLUMNS` order.
pub const COLUMN_WIDTHS: [u16; 10] = [22, 10, 9, 9, 9, 9, 7, 8, 9, 8];

/// Gap between adjacent columns.
pub const COLUMN_SPACING: u16 = 1;

/// Render the standings table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(
        DISPLAY_COLUMNS
            .iter()
            .map(|c| Cell::from(header_label(*c, &state.sort))),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .rows
        .iter()
        .skip(state.scroll_offset)
        .map(|row| Row::new(row.cells().into_iter().map(|c| Cell::from(c.to_string()))))
        .collect();

    let widths = COLUMN_WIDTHS.map(Constraint::Length);

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .block(table_block());
    frame.render_widget(table, area);
}

fn table_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Standings")
}

/// Cell rects of each displayed column, laid out across `inner`.
fn column_rects(inner: Rect) -> Rc<[Rect]> {
    Layout::horizontal(COLUMN_WIDTHS.map(Constraint::Length))
        .spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .split(inner)
}

/// Header text for `column`, with a direction marker when it is the active
/// sort. Sorting by wins or losses marks the record column.
pub fn header_label(column: Column, sort: &SortState) -> String {
    let arrow = match sort.direction {
        Direction::Ascending => "▲",
        Direction::Descending => "▼",
    };
    match (column, sort.resolved()) {
        (Column::Record, Some(Column::Wins)) => format!("Rec W{arrow}"),
        (Column::Record, Some(Column::Losses)) => format!("Rec L{arrow}"),
        (c, Some(active)) if c == active => format!("{} {arrow}", c.title()),
        (c, _) => c.title().to_string(),
    }
}

/// The column whose header cell contains terminal position (`x`, `y`), if
/// the position is on the header row of a table drawn in `area`.
pub fn column_at(area: Rect, x: u16, y: u16) -> Option<Column> {
    let inner = table_block().inner(area);
    // Header is the first row inside the border.
    if inner.height == 0 || y != inner.y {
        return None;
    }
    DISPLAY_COLUMNS
        .iter()
        .zip(column_rects(inner).iter())
        .find(|(_, rect)| rect.width > 0 && x >= rect.x && x < rect.right())
        .map(|(column, _)| *column)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
