// Terminal front-end for the standings table.
//
// The TUI owns a `ViewState` mirroring what the event loop last drew. The
// loop pushes `UiUpdate` messages over a channel; the TUI applies them and
// re-renders at ~30 fps. Key presses and header clicks go back as
// `UserCommand`s.

pub mod input;
pub mod layout;
pub mod widgets;

use std::io::stdout;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use standings_core::protocol::{Diagnostic, UiUpdate, UserCommand};
use standings_core::render::TableRow;
use standings_core::sort::SortState;

use layout::{build_layout, visible_rows};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local copy of the table as last drawn.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Rows in display order. Replaced wholesale on every frame.
    pub rows: Vec<TableRow>,
    pub sort: SortState,
    pub loaded_at: Option<DateTime<Utc>>,
    /// A fetch is in flight.
    pub loading: bool,
    pub last_diagnostic: Option<Diagnostic>,
    /// Index of the first visible row.
    pub scroll_offset: usize,
    /// Data rows that fit in the table at the last draw.
    pub page_rows: usize,
    /// Endpoint shown in the status bar.
    pub source_url: String,
}

impl ViewState {
    pub fn scroll_up(&mut self, by: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(by);
    }

    /// Scroll down, never past the point where the last row reaches the
    /// bottom of a `page`-row viewport.
    pub fn scroll_down(&mut self, by: usize, page: usize) {
        self.scroll_offset = (self.scroll_offset + by).min(self.max_scroll(page));
    }

    /// Pull the offset back so a `page`-row viewport stays full.
    pub fn clamp_scroll(&mut self, page: usize) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll(page));
    }

    fn max_scroll(&self, page: usize) -> usize {
        self.rows.len().saturating_sub(page.max(1))
    }
}

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Table(frame) => {
            let frame = *frame;
            state.rows = frame.rows;
            state.sort = frame.sort;
            state.loaded_at = frame.loaded_at;
            state.loading = false;
            state.clamp_scroll(state.page_rows);
        }
        UiUpdate::Loading => {
            state.loading = true;
        }
        UiUpdate::Diagnostic(diagnostic) => {
            state.loading = false;
            state.last_diagnostic = Some(diagnostic);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::standings::render(frame, layout.table, state);
    widgets::status_bar::render_diagnostic(frame, layout.diagnostic, state);
    widgets::status_bar::render_help(frame, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the update channel closes.
///
/// 1. Initializes the terminal (raw mode, alternate screen, mouse capture).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, terminal input and a render tick.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::UnboundedReceiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    source_url: String,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState {
        source_url,
        ..ViewState::default()
    };
    let mut screen = Rect::default();

    let mut event_stream = EventStream::new();
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                let layout = build_layout(screen);
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        input::handle_key(key_event, &mut view_state, &layout)
                    }
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        input::handle_mouse(mouse_event, &mut view_state, &layout)
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                };

                if let Some(command) = command {
                    let quit = command == UserCommand::Quit;
                    if cmd_tx.send(command).await.is_err() || quit {
                        break Ok(());
                    }
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| {
                    screen = frame.area();
                    render_frame(frame, &view_state);
                }) {
                    break Err(e.into());
                }
                view_state.page_rows = visible_rows(build_layout(screen).table);
                view_state.clamp_scroll(view_state.page_rows);
            }
        }
    };

    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use standings_core::model::TeamRecord;
    use standings_core::render::TableFrame;
    use standings_core::sort::Direction;

    fn frame_of(names: &[&str]) -> UiUpdate {
        let records: Vec<_> = names.iter().map(|n| TeamRecord::new(*n, 1, 1)).collect();
        let sort = SortState {
            column: Some("name".into()),
            direction: Direction::Descending,
        };
        UiUpdate::Table(Box::new(TableFrame::build(&records, &sort, Some(Utc::now()))))
    }

    #[test]
    fn table_update_replaces_all_rows() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, frame_of(&["A", "B", "C"]));
        apply_ui_update(&mut state, frame_of(&["D"]));
        let names: Vec<_> = state.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["D"]);
        assert_eq!(state.sort.direction, Direction::Descending);
        assert!(state.loaded_at.is_some());
    }

    #[test]
    fn loading_flag_cleared_by_frame_or_diagnostic() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Loading);
        assert!(state.loading);
        apply_ui_update(&mut state, frame_of(&["A"]));
        assert!(!state.loading);

        apply_ui_update(&mut state, UiUpdate::Loading);
        apply_ui_update(
            &mut state,
            UiUpdate::Diagnostic(Diagnostic::now("Error fetching teams: HTTP 500")),
        );
        assert!(!state.loading);
        assert_eq!(state.rows.len(), 1);
        assert!(state.last_diagnostic.is_some());
    }

    #[test]
    fn shrinking_table_clamps_scroll() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, frame_of(&["A", "B", "C", "D"]));
        state.scroll_offset = 3;
        apply_ui_update(&mut state, frame_of(&["A", "B"]));
        assert_eq!(state.scroll_offset, 1);
        apply_ui_update(&mut state, frame_of(&[]));
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn shrinking_table_keeps_viewport_full() {
        let names: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut state = ViewState {
            page_rows: 3,
            ..ViewState::default()
        };
        apply_ui_update(&mut state, frame_of(&names));
        state.scroll_down(100, 3);
        assert_eq!(state.scroll_offset, 7);

        // Reload with half the teams: same clamp as scrolling gives.
        apply_ui_update(&mut state, frame_of(&names[..5]));
        assert_eq!(state.scroll_offset, 2);
        let mut scrolled = ViewState {
            page_rows: 3,
            ..ViewState::default()
        };
        apply_ui_update(&mut scrolled, frame_of(&names[..5]));
        scrolled.scroll_down(100, 3);
        assert_eq!(scrolled.scroll_offset, state.scroll_offset);
    }

    #[test]
    fn render_frame_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(120, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        apply_ui_update(&mut state, frame_of(&["A", "B"]));
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
