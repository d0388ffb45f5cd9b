//! Per-season team record aggregation.

use crate::common::math::round2;
use crate::models::game::Game;
use crate::models::team::SeasonRecord;
use crate::stats::StatsError;

/// Label for the season ending in `year`, e.g. `2018-2019` for 2019.
/// A season runs from October of the prior year through the following spring.
pub fn season_label(year: i32) -> String {
    format!("{}-{}", year - 1, year)
}

/// Reduce one team's games for a single season into a win/loss record with
/// per-game scoring averages.
///
/// Every game must involve `team_id` on one side; the database query that
/// feeds this guarantees it. Zero games is rejected instead of dividing by
/// zero.
pub fn season_record(
    team_id: i64,
    label: &str,
    games: &[Game],
) -> Result<SeasonRecord, StatsError> {
    if games.is_empty() {
        return Err(StatsError::ZeroGames(label.to_string()));
    }

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut points_for = 0i64;
    let mut points_allowed = 0i64;

    for game in games {
        if game.winner_team() == team_id {
            wins += 1;
        } else {
            losses += 1;
        }
        if game.home == team_id {
            points_for += game.pts_home as i64;
            points_allowed += game.pts_away as i64;
        } else {
            points_for += game.pts_away as i64;
            points_allowed += game.pts_home as i64;
        }
    }

    let games_played = games.len() as f64;
    Ok(SeasonRecord {
        season_label: label.to_string(),
        wins,
        losses,
        average_points_for: round2(points_for as f64 / games_played),
        average_points_allowed: round2(points_allowed as f64 / games_played),
    })
}
