//! Unit tests for the season aggregator

use chrono::NaiveDate;
use courtside::models::game::Game;
use courtside::stats::{season_label, season_record, StatsError};

const SUBJECT: i64 = 1;
const OPPONENT: i64 = 2;

fn game(home: i64, away: i64, pts_home: i32, pts_away: i32, winner: i64) -> Game {
    Game {
        game_id: 0,
        home,
        away,
        winner,
        date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        pts_home,
        pts_away,
        reb_home: 0,
        reb_away: 0,
        ast_home: 0,
        ast_away: 0,
        stl_home: 0,
        stl_away: 0,
        blk_home: 0,
        blk_away: 0,
    }
}

#[test]
fn wins_losses_and_scoring_averages() {
    let games = vec![
        // Subject at home, wins 100-90
        game(SUBJECT, OPPONENT, 100, 90, SUBJECT),
        // Subject away, loses 80-85. The losing side must carry the lower
        // score or higher-points-wins would flip this into a second win.
        game(OPPONENT, SUBJECT, 85, 80, OPPONENT),
        // Tied score, stored winner column decides against the subject
        game(SUBJECT, OPPONENT, 70, 70, OPPONENT),
    ];

    let record = season_record(SUBJECT, "2022-2023", &games).expect("record");
    assert_eq!(record.wins, 1);
    assert_eq!(record.losses, 2);
    // Subject scored 100, 80, 70; allowed 90, 85, 70
    assert_eq!(record.average_points_for, 83.33);
    assert_eq!(record.average_points_allowed, 81.67);
}

#[test]
fn tie_break_uses_the_winner_column() {
    let games = vec![game(SUBJECT, OPPONENT, 70, 70, SUBJECT)];
    let record = season_record(SUBJECT, "2022-2023", &games).expect("record");
    assert_eq!(record.wins, 1);
    assert_eq!(record.losses, 0);
}

#[test]
fn zero_games_is_rejected_not_divided() {
    let result = season_record(SUBJECT, "2022-2023", &[]);
    assert_eq!(
        result,
        Err(StatsError::ZeroGames("2022-2023".to_string()))
    );
}

#[test]
fn aggregation_does_not_depend_on_game_order() {
    let mut games = vec![
        game(SUBJECT, OPPONENT, 100, 90, SUBJECT),
        game(OPPONENT, SUBJECT, 85, 80, OPPONENT),
    ];
    let forward = season_record(SUBJECT, "2022-2023", &games).expect("record");
    games.reverse();
    let reversed = season_record(SUBJECT, "2022-2023", &games).expect("record");
    assert_eq!(forward, reversed);
}

#[test]
fn season_label_spans_calendar_years() {
    assert_eq!(season_label(2019), "2018-2019");
    assert_eq!(season_label(2023), "2022-2023");
}
