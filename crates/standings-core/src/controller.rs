// Table controller: the single owner of the displayed records and sort state.
//
// Every mutation goes through `complete_load` or `sort_by`, and each of those
// draws at most once. Failed loads never reach the renderer, so whatever was
// drawn last stays on screen.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::loader::FetchError;
use crate::model::TeamRecord;
use crate::protocol::Diagnostic;
use crate::render::{RenderError, RenderTarget, TableFrame};
use crate::sort::{self, SortState};

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Records replaced and redrawn.
    Applied,
    /// The fetch failed; a diagnostic was recorded and nothing was redrawn.
    Failed,
    /// A newer load was started after this one; the result was dropped.
    Stale,
}

pub struct TableController<T: RenderTarget> {
    /// Records in their current display order.
    records: Vec<TeamRecord>,
    sort_state: SortState,
    /// Generation of the most recently started load. Completions carrying
    /// any other generation are stale.
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
    diagnostics: VecDeque<Diagnostic>,
    settings: TableConfig,
    target: T,
}

impl<T: RenderTarget> TableController<T> {
    pub fn new(settings: TableConfig, target: T) -> Self {
        TableController {
            records: Vec::new(),
            sort_state: SortState::default(),
            generation: 0,
            loaded_at: None,
            diagnostics: VecDeque::new(),
            settings,
            target,
        }
    }

    pub fn records(&self) -> &[TeamRecord] {
        &self.records
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort_state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Recorded failures, oldest first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Register a new fetch and return its generation.
    pub fn begin_load(&mut self) -> Result<u64, RenderError> {
        self.generation += 1;
        debug!("Starting load generation {}", self.generation);
        self.target.loading()?;
        Ok(self.generation)
    }

    /// Apply the result of the fetch started as `generation`.
    pub fn complete_load(
        &mut self,
        generation: u64,
        result: Result<Vec<TeamRecord>, FetchError>,
    ) -> Result<LoadOutcome, RenderError> {
        if generation != self.generation {
            debug!(
                "Discarding stale load (load gen: {}, current gen: {})",
                generation, self.generation
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(records) => {
                if !self.settings.reapply_sort_on_load {
                    self.sort_state = SortState::default();
                }
                self.records = sort::apply(&records, &self.sort_state);
                self.loaded_at = Some(Utc::now());
                info!(
                    "Loaded {} teams (sort: {:?} {:?})",
                    self.records.len(),
                    self.sort_state.column,
                    self.sort_state.direction
                );
                self.render()?;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                self.record_failure(&err)?;
                Ok(LoadOutcome::Failed)
            }
        }
    }

    /// Handle activation of the sort control labelled `column`.
    pub fn sort_by(&mut self, column: &str) -> Result<(), RenderError> {
        let (records, state) = sort::sort(&self.records, column, &self.sort_state);
        debug!("Sorted by {:?} {:?}", state.column, state.direction);
        self.records = records;
        self.sort_state = state;
        self.render()
    }

    fn render(&mut self) -> Result<(), RenderError> {
        let frame = TableFrame::build(&self.records, &self.sort_state, self.loaded_at);
        self.target.draw(frame)
    }

    fn record_failure(&mut self, err: &FetchError) -> Result<(), RenderError> {
        warn!("Error fetching teams: {}", err);
        let diagnostic = Diagnostic::now(format!("Error fetching teams: {err}"));
        // A cap of zero keeps no history; the target is still notified.
        if self.settings.max_diagnostics > 0 {
            while self.diagnostics.len() >= self.settings.max_diagnostics {
                self.diagnostics.pop_front();
            }
            self.diagnostics.push_back(diagnostic.clone());
        }
        self.target.notify(&diagnostic)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
