//! Unit tests for team comparison totals

use chrono::NaiveDate;
use courtside::models::game::Game;
use courtside::stats::{team_totals, CompareMetric};

const SUBJECT: i64 = 1;
const OPPONENT: i64 = 2;

fn game(home: i64, away: i64, pts: (i32, i32), reb: (i32, i32), ast: (i32, i32)) -> Game {
    Game {
        game_id: 0,
        home,
        away,
        winner: if pts.0 > pts.1 { home } else { away },
        date: NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
        pts_home: pts.0,
        pts_away: pts.1,
        reb_home: reb.0,
        reb_away: reb.1,
        ast_home: ast.0,
        ast_away: ast.1,
        stl_home: 3,
        stl_away: 4,
        blk_home: 1,
        blk_away: 2,
    }
}

#[test]
fn totals_take_the_side_the_team_played() {
    let games = vec![
        game(SUBJECT, OPPONENT, (100, 90), (40, 38), (25, 20)),
        game(OPPONENT, SUBJECT, (95, 105), (42, 45), (22, 28)),
    ];
    let totals = team_totals(SUBJECT, &games);
    assert_eq!(totals.games, 2);
    assert_eq!(totals.wins, 2);
    assert_eq!(totals.points, 205);
    assert_eq!(totals.rebounds, 85);
    assert_eq!(totals.assists, 53);
    assert_eq!(totals.steals, 7);
    assert_eq!(totals.blocks, 3);
}

#[test]
fn per_game_metrics_divide_by_games_played() {
    let games = vec![
        game(SUBJECT, OPPONENT, (100, 90), (40, 38), (25, 20)),
        game(OPPONENT, SUBJECT, (95, 105), (42, 45), (22, 28)),
    ];
    let totals = team_totals(SUBJECT, &games);
    assert_eq!(totals.metric(CompareMetric::Points, 5), 102.5);
    assert_eq!(totals.metric(CompareMetric::Rebounds, 5), 42.5);
}

#[test]
fn wins_metric_averages_per_season() {
    let games = vec![
        game(SUBJECT, OPPONENT, (100, 90), (40, 38), (25, 20)),
        game(SUBJECT, OPPONENT, (100, 90), (40, 38), (25, 20)),
        game(SUBJECT, OPPONENT, (100, 90), (40, 38), (25, 20)),
    ];
    let totals = team_totals(SUBJECT, &games);
    assert_eq!(totals.metric(CompareMetric::Wins, 2), 1.5);
}

#[test]
fn no_games_yields_zero_not_nan() {
    let totals = team_totals(SUBJECT, &[]);
    assert_eq!(totals.metric(CompareMetric::Points, 5), 0.0);
    assert_eq!(totals.metric(CompareMetric::Wins, 5), 0.0);
}
