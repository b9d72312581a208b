// Messages exchanged between the terminal UI, the fetch tasks and the
// application event loop.

use chrono::{DateTime, Utc};

use crate::loader::FetchError;
use crate::model::TeamRecord;
use crate::render::TableFrame;

/// Commands produced by the UI (key presses, header clicks).
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Fetch the team list again.
    Load,
    /// Sort by the column with this identifier.
    SortBy(String),
    Quit,
}

/// Completion of a spawned fetch, tagged with the generation that issued it.
#[derive(Debug)]
pub struct LoadEvent {
    pub generation: u64,
    pub result: Result<Vec<TeamRecord>, FetchError>,
}

/// Updates pushed from the event loop to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Replace every displayed row.
    Table(Box<TableFrame>),
    /// A fetch has started.
    Loading,
    Diagnostic(Diagnostic),
}

/// A recorded failure, kept for display and inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl Diagnostic {
    pub fn now(message: impl Into<String>) -> Self {
        Diagnostic {
            at: Utc::now(),
            message: message.into(),
        }
    }
}
