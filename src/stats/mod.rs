//! Aggregation of raw game rows into season and comparison statistics.

pub mod compare;
pub mod season;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// No games in the requested window; per-game averages are undefined.
    #[error("no games recorded for season {0}")]
    ZeroGames(String),
}

pub use compare::{team_totals, CompareMetric, TeamTotals};
pub use season::{season_label, season_record};
