// Renderer: typed table rows and the targets they are drawn into.
//
// Rows are built as structured values (one formatted string per cell) and
// handed to a `RenderTarget` as a complete frame. Targets replace whatever
// they showed before; there is no incremental diffing.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::model::TeamRecord;
use crate::protocol::{Diagnostic, UiUpdate};
use crate::sort::{Column, SortState, DISPLAY_COLUMNS};

/// Text shown for a stat the backend did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("render target is missing: {0}")]
    TargetMissing(String),
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One formatted table row, cells in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub conference: String,
    pub record: String,
    pub points_for: String,
    pub points_against: String,
    pub luck_adjusted_points_for: String,
    pub strength_of_schedule: String,
    pub projected_wins: String,
    pub playoff_chance: String,
    pub monke_score: String,
}

impl TableRow {
    pub fn from_record(team: &TeamRecord) -> TableRow {
        TableRow {
            name: team.name.clone(),
            conference: team.conference.clone(),
            record: format!("{}-{}", team.wins, team.losses),
            points_for: fixed(team.points_for, 2),
            points_against: fixed(team.points_against, 2),
            luck_adjusted_points_for: fixed(team.luck_adjusted_points_for, 2),
            strength_of_schedule: fixed(team.strength_of_schedule, 3),
            projected_wins: fixed(team.projected_wins, 2),
            playoff_chance: percent(team.playoff_chance),
            monke_score: fixed(team.monke_score, 2),
        }
    }

    /// Text for a column. `Wins` and `Losses` share the record cell.
    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Conference => &self.conference,
            Column::Record | Column::Wins | Column::Losses => &self.record,
            Column::PointsFor => &self.points_for,
            Column::PointsAgainst => &self.points_against,
            Column::LuckAdjustedPointsFor => &self.luck_adjusted_points_for,
            Column::StrengthOfSchedule => &self.strength_of_schedule,
            Column::ProjectedWins => &self.projected_wins,
            Column::PlayoffChance => &self.playoff_chance,
            Column::MonkeScore => &self.monke_score,
        }
    }

    pub fn cells(&self) -> Vec<&str> {
        DISPLAY_COLUMNS.iter().map(|c| self.cell(*c)).collect()
    }
}

/// Fixed-point text, or `N/A` when absent. A present zero stays a number.
fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.decimals$}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.1}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Everything a target needs to redraw the table body.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFrame {
    pub rows: Vec<TableRow>,
    pub sort: SortState,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl TableFrame {
    pub fn build(
        records: &[TeamRecord],
        sort: &SortState,
        loaded_at: Option<DateTime<Utc>>,
    ) -> TableFrame {
        TableFrame {
            rows: records.iter().map(TableRow::from_record).collect(),
            sort: sort.clone(),
            loaded_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// Destination for rendered frames.
///
/// `draw` replaces every previously drawn row with `frame.rows`.
pub trait RenderTarget {
    fn draw(&mut self, frame: TableFrame) -> Result<(), RenderError>;

    /// Surface a diagnostic without touching the drawn rows.
    fn notify(&mut self, diagnostic: &Diagnostic) -> Result<(), RenderError>;

    /// A fetch has started. Rows stay as they are.
    fn loading(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Forwards frames to the terminal UI task.
pub struct ChannelTarget {
    tx: mpsc::UnboundedSender<UiUpdate>,
}

impl ChannelTarget {
    pub fn new(tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        ChannelTarget { tx }
    }
}

impl RenderTarget for ChannelTarget {
    fn draw(&mut self, frame: TableFrame) -> Result<(), RenderError> {
        self.tx
            .send(UiUpdate::Table(Box::new(frame)))
            .map_err(|_| RenderError::TargetMissing("UI channel closed".into()))
    }

    fn notify(&mut self, diagnostic: &Diagnostic) -> Result<(), RenderError> {
        self.tx
            .send(UiUpdate::Diagnostic(diagnostic.clone()))
            .map_err(|_| RenderError::TargetMissing("UI channel closed".into()))
    }

    fn loading(&mut self) -> Result<(), RenderError> {
        self.tx
            .send(UiUpdate::Loading)
            .map_err(|_| RenderError::TargetMissing("UI channel closed".into()))
    }
}

/// Keeps every frame and diagnostic it receives. Used by tests and by
/// headless runs.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub frames: Vec<TableFrame>,
    pub notices: Vec<Diagnostic>,
}

impl RecordingTarget {
    /// Rows currently "on screen": those of the latest frame.
    pub fn current_rows(&self) -> &[TableRow] {
        self.frames.last().map(|f| f.rows.as_slice()).unwrap_or(&[])
    }

    pub fn current_names(&self) -> Vec<&str> {
        self.current_rows().iter().map(|r| r.name.as_str()).collect()
    }
}

impl RenderTarget for RecordingTarget {
    fn draw(&mut self, frame: TableFrame) -> Result<(), RenderError> {
        self.frames.push(frame);
        Ok(())
    }

    fn notify(&mut self, diagnostic: &Diagnostic) -> Result<(), RenderError> {
        self.notices.push(diagnostic.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
