//! Team entities, season records, and the TEAM pricing preset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pricing::{Observation, PricingPolicy, StatKey};

/// A franchise row from the `teams` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub team_abbrev: String,
}

/// The statistics a team is priced on. Losses are derivable from wins and are
/// deliberately not part of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamStat {
    Wins,
    AveragePointsFor,
    AveragePointsAllowed,
}

impl StatKey for TeamStat {
    const ALL: &'static [Self] = &[
        Self::Wins,
        Self::AveragePointsFor,
        Self::AveragePointsAllowed,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Wins => "wins",
            Self::AveragePointsFor => "average_points_for",
            Self::AveragePointsAllowed => "average_points_allowed",
        }
    }
}

/// Aggregated result of one team's season, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub season_label: String,
    pub wins: u32,
    pub losses: u32,
    pub average_points_for: f64,
    pub average_points_allowed: f64,
}

/// One season's team statistics tagged with the season year, the unit the
/// trend regression runs over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamObservation {
    pub season: i32,
    pub wins: f64,
    pub average_points_for: f64,
    pub average_points_allowed: f64,
}

impl TeamObservation {
    pub fn from_record(season: i32, record: &SeasonRecord) -> Self {
        Self {
            season,
            wins: record.wins as f64,
            average_points_for: record.average_points_for,
            average_points_allowed: record.average_points_allowed,
        }
    }
}

impl Observation for TeamObservation {
    type Key = TeamStat;

    fn time_key(&self) -> f64 {
        self.season as f64
    }

    fn value(&self, key: TeamStat) -> f64 {
        match key {
            TeamStat::Wins => self.wins,
            TeamStat::AveragePointsFor => self.average_points_for,
            TeamStat::AveragePointsAllowed => self.average_points_allowed,
        }
    }
}

/// The TEAM pricing preset: fixed domain ceilings (82 games, 150 points per
/// game either way) and weights favoring scoring over defense, with points
/// allowed weighted negatively.
pub fn pricing_policy() -> PricingPolicy<TeamStat> {
    let weights = HashMap::from([
        (TeamStat::Wins, 0.7),
        (TeamStat::AveragePointsFor, 0.7),
        (TeamStat::AveragePointsAllowed, -0.4),
    ]);
    let max_values = HashMap::from([
        (TeamStat::Wins, 82.0),
        (TeamStat::AveragePointsFor, 150.0),
        (TeamStat::AveragePointsAllowed, 150.0),
    ]);
    PricingPolicy { weights, max_values }
}
