// Keyboard and mouse input handling.
//
// Translates crossterm events into `UserCommand`s for the event loop, or
// into local `ViewState` changes (scrolling).

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use standings_core::protocol::UserCommand;
use standings_core::sort::{Column, DISPLAY_COLUMNS};

use crate::layout::{visible_rows, BoardLayout};
use crate::widgets::standings::column_at;
use crate::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` for keys the event loop must act on;
/// scrolling is applied to `view_state` directly and returns `None`.
pub fn handle_key(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    layout: &BoardLayout,
) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act once.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    let page = visible_rows(layout.table).max(1);

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),
        KeyCode::Char('r') => Some(UserCommand::Load),
        KeyCode::Char('w') => Some(sort_by(Column::Wins)),
        KeyCode::Char('l') => Some(sort_by(Column::Losses)),
        KeyCode::Char(c @ '0'..='9') => column_for_digit(c).map(sort_by),

        KeyCode::Up | KeyCode::Char('k') => {
            view_state.scroll_up(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.scroll_down(1, page);
            None
        }
        KeyCode::PageUp => {
            view_state.scroll_up(page);
            None
        }
        KeyCode::PageDown => {
            view_state.scroll_down(page, page);
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            view_state.scroll_offset = 0;
            None
        }
        _ => None,
    }
}

/// Handle a mouse event: header clicks sort, the wheel scrolls.
pub fn handle_mouse(
    mouse_event: MouseEvent,
    view_state: &mut ViewState,
    layout: &BoardLayout,
) -> Option<UserCommand> {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            column_at(layout.table, mouse_event.column, mouse_event.row).map(sort_by)
        }
        MouseEventKind::ScrollUp => {
            view_state.scroll_up(1);
            None
        }
        MouseEventKind::ScrollDown => {
            view_state.scroll_down(1, visible_rows(layout.table).max(1));
            None
        }
        _ => None,
    }
}

/// `1` selects the first displayed column, `0` the tenth.
fn column_for_digit(c: char) -> Option<Column> {
    let digit = c.to_digit(10)? as usize;
    let index = if digit == 0 { 9 } else { digit - 1 };
    DISPLAY_COLUMNS.get(index).copied()
}

fn sort_by(column: Column) -> UserCommand {
    UserCommand::SortBy(column.key().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
