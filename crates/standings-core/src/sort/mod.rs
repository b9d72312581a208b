// Sort engine: column toggling and stable ordering of team records.

pub mod column;

use std::cmp::Ordering;

use tracing::debug;

use crate::model::TeamRecord;
pub use column::{Column, SortValue, DISPLAY_COLUMNS};

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// The active sort column and direction.
///
/// `column` keeps the raw identifier of the control that was activated, so
/// an identifier the engine does not recognise is still remembered (and
/// toggles like any other) even though it never reorders anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Direction,
}

impl SortState {
    /// State after selecting `column`: same column flips the direction,
    /// a different column starts ascending.
    pub fn toggled(&self, column: &str) -> SortState {
        match &self.column {
            Some(current) if current == column => SortState {
                column: self.column.clone(),
                direction: self.direction.flipped(),
            },
            _ => SortState {
                column: Some(column.to_string()),
                direction: Direction::Ascending,
            },
        }
    }

    /// The recognised column, if any.
    pub fn resolved(&self) -> Option<Column> {
        self.column.as_deref().and_then(Column::from_key)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Select `column` and reorder `records` accordingly.
///
/// Returns the reordered copy together with the new state. The input slice
/// is left untouched.
pub fn sort(
    records: &[TeamRecord],
    column: &str,
    current: &SortState,
) -> (Vec<TeamRecord>, SortState) {
    let state = current.toggled(column);
    let ordered = apply(records, &state);
    (ordered, state)
}

/// Order `records` by an existing state without toggling it.
///
/// No column, or an unknown one, returns the records in their given order.
pub fn apply(records: &[TeamRecord], state: &SortState) -> Vec<TeamRecord> {
    let mut ordered = records.to_vec();
    let Some(column) = state.resolved() else {
        if let Some(unknown) = &state.column {
            debug!("Ignoring sort on unknown column {:?}", unknown);
        }
        return ordered;
    };

    // slice::sort_by is stable, so ties keep their previous relative order
    // in both directions.
    ordered.sort_by(|a, b| compare(column.value(a), column.value(b), state.direction));
    ordered
}

/// Compare two column values.
///
/// Absent values always go last; `direction` only orients present values.
pub fn compare(a: SortValue<'_>, b: SortValue<'_>, direction: Direction) -> Ordering {
    match (a, b) {
        (SortValue::Absent, SortValue::Absent) => Ordering::Equal,
        (SortValue::Absent, _) => Ordering::Greater,
        (_, SortValue::Absent) => Ordering::Less,
        (SortValue::Number(x), SortValue::Number(y)) => {
            direction.orient(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
        }
        (SortValue::Text(x), SortValue::Text(y)) => direction.orient(x.cmp(y)),
        // A column never mixes kinds.
        _ => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
