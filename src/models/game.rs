//! Game rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A game row from the `games` table. `winner` stores a team id and is only
/// consulted when the score is tied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: i64,
    pub home: i64,
    pub away: i64,
    pub winner: i64,
    pub date: NaiveDate,
    pub pts_home: i32,
    pub pts_away: i32,
    pub reb_home: i32,
    pub reb_away: i32,
    pub ast_home: i32,
    pub ast_away: i32,
    pub stl_home: i32,
    pub stl_away: i32,
    pub blk_home: i32,
    pub blk_away: i32,
}

/// A game as submitted for insertion, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    pub home: i64,
    pub away: i64,
    pub winner: i64,
    pub date: NaiveDate,
    pub pts_home: i32,
    pub pts_away: i32,
    pub reb_home: i32,
    pub reb_away: i32,
    pub ast_home: i32,
    pub ast_away: i32,
    pub stl_home: i32,
    pub stl_away: i32,
    pub blk_home: i32,
    pub blk_away: i32,
}

impl Game {
    /// Winning team id: the higher-points side, falling back to the stored
    /// winner column when the score is tied.
    pub fn winner_team(&self) -> i64 {
        match self.pts_home.cmp(&self.pts_away) {
            std::cmp::Ordering::Greater => self.home,
            std::cmp::Ordering::Less => self.away,
            std::cmp::Ordering::Equal => self.winner,
        }
    }
}
