//! Athlete entities, season stat lines, and the ATHLETE pricing preset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pricing::{Observation, PricingPolicy, StatKey};

/// A player row from the `athletes` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub athlete_id: i64,
    pub name: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

/// The ten per-season statistics an athlete is priced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AthleteStat {
    GamesPlayed,
    MinutesPlayed,
    FieldGoalPercentage,
    FreeThrowPercentage,
    TotalRebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Points,
}

impl StatKey for AthleteStat {
    const ALL: &'static [Self] = &[
        Self::GamesPlayed,
        Self::MinutesPlayed,
        Self::FieldGoalPercentage,
        Self::FreeThrowPercentage,
        Self::TotalRebounds,
        Self::Assists,
        Self::Steals,
        Self::Blocks,
        Self::Turnovers,
        Self::Points,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::GamesPlayed => "games_played",
            Self::MinutesPlayed => "minutes_played",
            Self::FieldGoalPercentage => "field_goal_percentage",
            Self::FreeThrowPercentage => "free_throw_percentage",
            Self::TotalRebounds => "total_rebounds",
            Self::Assists => "assists",
            Self::Steals => "steals",
            Self::Blocks => "blocks",
            Self::Turnovers => "turnovers",
            Self::Points => "points",
        }
    }
}

/// One athlete season from the `athlete_stats` table. The row also carries
/// age and team id in the database, but those are identifying fields, not
/// statistics, and are never regressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteSeason {
    pub year: i32,
    pub games_played: f64,
    pub minutes_played: f64,
    pub field_goal_percentage: f64,
    pub free_throw_percentage: f64,
    pub total_rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub points: f64,
}

impl Observation for AthleteSeason {
    type Key = AthleteStat;

    fn time_key(&self) -> f64 {
        self.year as f64
    }

    fn value(&self, key: AthleteStat) -> f64 {
        match key {
            AthleteStat::GamesPlayed => self.games_played,
            AthleteStat::MinutesPlayed => self.minutes_played,
            AthleteStat::FieldGoalPercentage => self.field_goal_percentage,
            AthleteStat::FreeThrowPercentage => self.free_throw_percentage,
            AthleteStat::TotalRebounds => self.total_rebounds,
            AthleteStat::Assists => self.assists,
            AthleteStat::Steals => self.steals,
            AthleteStat::Blocks => self.blocks,
            AthleteStat::Turnovers => self.turnovers,
            AthleteStat::Points => self.points,
        }
    }
}

/// The ATHLETE pricing preset. Weights sum to 1.0; ceilings come from the
/// population maxima observed in the database.
pub fn pricing_policy(max_values: HashMap<AthleteStat, f64>) -> PricingPolicy<AthleteStat> {
    let weights = HashMap::from([
        (AthleteStat::GamesPlayed, 0.2),
        (AthleteStat::MinutesPlayed, 0.15),
        (AthleteStat::FieldGoalPercentage, 0.1),
        (AthleteStat::FreeThrowPercentage, 0.1),
        (AthleteStat::TotalRebounds, 0.08),
        (AthleteStat::Assists, 0.12),
        (AthleteStat::Steals, 0.08),
        (AthleteStat::Blocks, 0.03),
        (AthleteStat::Turnovers, 0.02),
        (AthleteStat::Points, 0.12),
    ]);
    PricingPolicy { weights, max_values }
}
