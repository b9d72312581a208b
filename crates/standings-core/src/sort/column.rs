// Sortable columns and the values they extract from a team record.

use crate::model::TeamRecord;

/// A column the table can be ordered by.
///
/// `Record` is derived: it has no backing field and is computed as the win
/// ratio whenever a comparison needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Conference,
    Record,
    Wins,
    Losses,
    PointsFor,
    PointsAgainst,
    LuckAdjustedPointsFor,
    StrengthOfSchedule,
    ProjectedWins,
    PlayoffChance,
    MonkeScore,
}

/// Columns shown in the table, left to right.
///
/// `Wins` and `Losses` are sortable but share the combined `Record` cell.
pub const DISPLAY_COLUMNS: [Column; 10] = [
    Column::Name,
    Column::Conference,
    Column::Record,
    Column::PointsFor,
    Column::PointsAgainst,
    Column::LuckAdjustedPointsFor,
    Column::StrengthOfSchedule,
    Column::ProjectedWins,
    Column::PlayoffChance,
    Column::MonkeScore,
];

const ALL_COLUMNS: [Column; 12] = [
    Column::Name,
    Column::Conference,
    Column::Record,
    Column::Wins,
    Column::Losses,
    Column::PointsFor,
    Column::PointsAgainst,
    Column::LuckAdjustedPointsFor,
    Column::StrengthOfSchedule,
    Column::ProjectedWins,
    Column::PlayoffChance,
    Column::MonkeScore,
];

/// A comparable value pulled out of a record for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    /// Field missing, or a derived value that is not a number.
    Absent,
}

impl Column {
    /// Identifier used by sort controls; matches the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Conference => "conference",
            Column::Record => "record",
            Column::Wins => "wins",
            Column::Losses => "losses",
            Column::PointsFor => "points_for",
            Column::PointsAgainst => "points_against",
            Column::LuckAdjustedPointsFor => "luck_adjusted_points_for",
            Column::StrengthOfSchedule => "strength_of_schedule",
            Column::ProjectedWins => "projected_wins",
            Column::PlayoffChance => "playoff_chance",
            Column::MonkeScore => "monke_score",
        }
    }

    /// Resolve a control identifier. Unknown identifiers yield `None`.
    pub fn from_key(key: &str) -> Option<Column> {
        ALL_COLUMNS.iter().copied().find(|c| c.key() == key)
    }

    /// Short header label.
    pub fn title(self) -> &'static str {
        match self {
            Column::Name => "Team",
            Column::Conference => "Conf",
            Column::Record => "Record",
            Column::Wins => "W",
            Column::Losses => "L",
            Column::PointsFor => "PF",
            Column::PointsAgainst => "PA",
            Column::LuckAdjustedPointsFor => "LAPF",
            Column::StrengthOfSchedule => "SOS",
            Column::ProjectedWins => "Proj W",
            Column::PlayoffChance => "Playoff",
            Column::MonkeScore => "Monke",
        }
    }

    /// Extract this column's comparable value from `team`.
    pub fn value(self, team: &TeamRecord) -> SortValue<'_> {
        match self {
            Column::Name => SortValue::Text(&team.name),
            Column::Conference => SortValue::Text(&team.conference),
            Column::Record => number(Some(team.win_ratio())),
            Column::Wins => SortValue::Number(team.wins as f64),
            Column::Losses => SortValue::Number(team.losses as f64),
            Column::PointsFor => number(team.points_for),
            Column::PointsAgainst => number(team.points_against),
            Column::LuckAdjustedPointsFor => number(team.luck_adjusted_points_for),
            Column::StrengthOfSchedule => number(team.strength_of_schedule),
            Column::ProjectedWins => number(team.projected_wins),
            Column::PlayoffChance => number(team.playoff_chance),
            Column::MonkeScore => number(team.monke_score),
        }
    }
}

fn number<'a>(value: Option<f64>) -> SortValue<'a> {
    match value {
        Some(v) if !v.is_nan() => SortValue::Number(v),
        _ => SortValue::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_resolve_back_to_columns() {
        for column in ALL_COLUMNS {
            assert_eq!(Column::from_key(column.key()), Some(column));
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(Column::from_key("touchdowns"), None);
        assert_eq!(Column::from_key(""), None);
        assert_eq!(Column::from_key("Wins"), None);
    }

    #[test]
    fn record_value_is_ratio() {
        let team = TeamRecord::new("A", 3, 1);
        assert_eq!(Column::Record.value(&team), SortValue::Number(0.75));
    }

    #[test]
    fn winless_unplayed_record_is_absent() {
        let team = TeamRecord::new("A", 0, 0);
        assert_eq!(Column::Record.value(&team), SortValue::Absent);
    }

    #[test]
    fn missing_float_is_absent_but_zero_is_present() {
        let mut team = TeamRecord::new("A", 1, 1);
        assert_eq!(Column::StrengthOfSchedule.value(&team), SortValue::Absent);
        team.strength_of_schedule = Some(0.0);
        assert_eq!(
            Column::StrengthOfSchedule.value(&team),
            SortValue::Number(0.0)
        );
    }

    #[test]
    fn display_columns_exclude_wins_and_losses() {
        assert!(!DISPLAY_COLUMNS.contains(&Column::Wins));
        assert!(!DISPLAY_COLUMNS.contains(&Column::Losses));
        assert_eq!(DISPLAY_COLUMNS[0], Column::Name);
    }
}
