//! Multi-team comparison by a single metric.

use serde::{Deserialize, Serialize};

use crate::common::math::round2;
use crate::models::game::Game;

/// Metric to rank compared teams by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMetric {
    Wins,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
}

/// Accumulated totals for one team across a set of games.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamTotals {
    pub games: u32,
    pub wins: u32,
    pub points: i64,
    pub rebounds: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
}

/// Accumulate a team's totals from its games, taking the home or away column
/// of each row depending on which side the team occupied.
pub fn team_totals(team_id: i64, games: &[Game]) -> TeamTotals {
    let mut totals = TeamTotals::default();

    for game in games {
        totals.games += 1;
        if game.winner_team() == team_id {
            totals.wins += 1;
        }
        if game.home == team_id {
            totals.points += game.pts_home as i64;
            totals.rebounds += game.reb_home as i64;
            totals.assists += game.ast_home as i64;
            totals.steals += game.stl_home as i64;
            totals.blocks += game.blk_home as i64;
        } else {
            totals.points += game.pts_away as i64;
            totals.rebounds += game.reb_away as i64;
            totals.assists += game.ast_away as i64;
            totals.steals += game.stl_away as i64;
            totals.blocks += game.blk_away as i64;
        }
    }

    totals
}

impl TeamTotals {
    /// Value of one comparison metric: wins averaged per season, everything
    /// else averaged per game. Zero games yields 0 rather than NaN.
    pub fn metric(&self, metric: CompareMetric, seasons: u32) -> f64 {
        if self.games == 0 || seasons == 0 {
            return 0.0;
        }
        let per_game = |total: i64| round2(total as f64 / self.games as f64);
        match metric {
            CompareMetric::Wins => round2(self.wins as f64 / seasons as f64),
            CompareMetric::Points => per_game(self.points),
            CompareMetric::Rebounds => per_game(self.rebounds),
            CompareMetric::Assists => per_game(self.assists),
            CompareMetric::Steals => per_game(self.steals),
            CompareMetric::Blocks => per_game(self.blocks),
        }
    }
}
