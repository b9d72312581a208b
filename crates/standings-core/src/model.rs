// Team record model as served by the stats backend.

use serde::{Deserialize, Serialize};

/// One row of league standings as returned by `GET /api/teams`.
///
/// Advanced stats are optional: the backend omits them (or sends `null`)
/// for teams it has not computed yet, which is a normal state rather than
/// a malformed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    #[serde(default)]
    pub conference: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub points_for: Option<f64>,
    #[serde(default)]
    pub points_against: Option<f64>,
    #[serde(default)]
    pub luck_adjusted_points_for: Option<f64>,
    #[serde(default)]
    pub strength_of_schedule: Option<f64>,
    #[serde(default)]
    pub projected_wins: Option<f64>,
    #[serde(default)]
    pub playoff_chance: Option<f64>,
    #[serde(default)]
    pub monke_score: Option<f64>,
}

impl TeamRecord {
    /// Minimal record with only the required fields populated.
    pub fn new(name: impl Into<String>, wins: u32, losses: u32) -> Self {
        TeamRecord {
            name: name.into(),
            conference: String::new(),
            wins,
            losses,
            points_for: None,
            points_against: None,
            luck_adjusted_points_for: None,
            strength_of_schedule: None,
            projected_wins: None,
            playoff_chance: None,
            monke_score: None,
        }
    }

    /// Win ratio `wins / (wins + losses)`.
    ///
    /// NaN when the team has not played a game yet.
    pub fn win_ratio(&self) -> f64 {
        let games = self.wins as f64 + self.losses as f64;
        self.wins as f64 / games
    }
}
