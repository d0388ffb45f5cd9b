//! PostgreSQL storage for teams, athletes, games, stat lines, ratings, and
//! users.

use std::collections::HashMap;

use tokio_postgres::{Client, NoTls, Row};

use crate::config;
use crate::models::athlete::{Athlete, AthleteSeason, AthleteStat};
use crate::models::game::{Game, NewGame};
use crate::models::team::Team;
use crate::models::user::User;
use crate::pricing::StatKey;

pub type DbError = Box<dyn std::error::Error + Send + Sync>;

fn db_error(message: String) -> DbError {
    Box::new(std::io::Error::other(message))
}

fn not_found(message: String) -> DbError {
    Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, message))
}

pub struct Database {
    client: Client,
}

impl Database {
    pub async fn new() -> Result<Self, DbError> {
        let database_url = config::get_database_url();
        let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
            .await
            .map_err(|e| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to PostgreSQL: {}", e),
                )) as DbError
            })?;

        // Drive the connection on its own task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        let db = Self { client };
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        let statements = [
            "CREATE TABLE IF NOT EXISTS teams (
                team_id BIGSERIAL PRIMARY KEY,
                team_name TEXT NOT NULL UNIQUE,
                team_abbrev TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS athletes (
                athlete_id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                age INT NOT NULL,
                team_id BIGINT REFERENCES teams (team_id)
            )",
            "CREATE TABLE IF NOT EXISTS games (
                game_id BIGSERIAL PRIMARY KEY,
                home BIGINT NOT NULL REFERENCES teams (team_id),
                away BIGINT NOT NULL REFERENCES teams (team_id),
                winner BIGINT NOT NULL,
                date DATE NOT NULL,
                pts_home INT NOT NULL,
                pts_away INT NOT NULL,
                reb_home INT NOT NULL,
                reb_away INT NOT NULL,
                ast_home INT NOT NULL,
                ast_away INT NOT NULL,
                stl_home INT NOT NULL,
                stl_away INT NOT NULL,
                blk_home INT NOT NULL,
                blk_away INT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS athlete_stats (
                athlete_id BIGINT NOT NULL REFERENCES athletes (athlete_id),
                year INT NOT NULL,
                games_played DOUBLE PRECISION NOT NULL,
                minutes_played DOUBLE PRECISION NOT NULL,
                field_goal_percentage DOUBLE PRECISION NOT NULL,
                free_throw_percentage DOUBLE PRECISION NOT NULL,
                total_rebounds DOUBLE PRECISION NOT NULL,
                assists DOUBLE PRECISION NOT NULL,
                steals DOUBLE PRECISION NOT NULL,
                blocks DOUBLE PRECISION NOT NULL,
                turnovers DOUBLE PRECISION NOT NULL,
                points DOUBLE PRECISION NOT NULL,
                PRIMARY KEY (athlete_id, year)
            )",
            "CREATE TABLE IF NOT EXISTS team_ratings (
                team_rating_id BIGSERIAL PRIMARY KEY,
                team_id BIGINT NOT NULL REFERENCES teams (team_id),
                rating INT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS athlete_ratings (
                athlete_rating_id BIGSERIAL PRIMARY KEY,
                athlete_id BIGINT NOT NULL REFERENCES athletes (athlete_id),
                rating INT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS users (
                user_id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )",
        ];

        for statement in statements {
            self.client
                .execute(statement, &[])
                .await
                .map_err(|e| db_error(format!("Failed to initialize schema: {}", e)))?;
        }

        Ok(())
    }

    // ---- teams ----

    pub async fn create_team(&self, team_name: &str, team_abbrev: &str) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO teams (team_name, team_abbrev)
                 VALUES ($1, $2)
                 RETURNING team_id",
                &[&team_name, &team_abbrev],
            )
            .await
            .map_err(|e| db_error(format!("Failed to create team: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn get_team_by_name(&self, team_name: &str) -> Result<Team, DbError> {
        let rows = self
            .client
            .query(
                "SELECT team_id, team_name, team_abbrev FROM teams WHERE team_name = $1",
                &[&team_name],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query team: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("Team {} not found", team_name)))?;
        Ok(Team {
            team_id: row.get(0),
            team_name: row.get(1),
            team_abbrev: row.get(2),
        })
    }

    pub async fn get_team_name(&self, team_id: i64) -> Result<String, DbError> {
        let rows = self
            .client
            .query("SELECT team_name FROM teams WHERE team_id = $1", &[&team_id])
            .await
            .map_err(|e| db_error(format!("Failed to query team name: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("Team {} not found", team_id)))?;
        Ok(row.get(0))
    }

    // ---- athletes ----

    pub async fn create_athlete(
        &self,
        name: &str,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO athletes (name, age, team_id)
                 VALUES ($1, $2, $3)
                 RETURNING athlete_id",
                &[&name, &age, &team_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to create athlete: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn get_athlete(&self, athlete_id: i64) -> Result<Athlete, DbError> {
        let rows = self
            .client
            .query(
                "SELECT athlete_id, name, age, team_id FROM athletes WHERE athlete_id = $1",
                &[&athlete_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query athlete: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("Athlete {} not found", athlete_id)))?;
        Ok(Athlete {
            athlete_id: row.get(0),
            name: row.get(1),
            age: row.get(2),
            team_id: row.get(3),
        })
    }

    pub async fn get_athlete_id_by_name(&self, name: &str) -> Result<i64, DbError> {
        let rows = self
            .client
            .query("SELECT athlete_id FROM athletes WHERE name = $1", &[&name])
            .await
            .map_err(|e| db_error(format!("Failed to query athlete: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("Athlete {} not found", name)))?;
        Ok(row.get(0))
    }

    pub async fn insert_athlete_season(
        &self,
        athlete_id: i64,
        season: &AthleteSeason,
    ) -> Result<(), DbError> {
        self.client
            .execute(
                "INSERT INTO athlete_stats (
                    athlete_id, year, games_played, minutes_played,
                    field_goal_percentage, free_throw_percentage, total_rebounds,
                    assists, steals, blocks, turnovers, points
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
                &[
                    &athlete_id,
                    &season.year,
                    &season.games_played,
                    &season.minutes_played,
                    &season.field_goal_percentage,
                    &season.free_throw_percentage,
                    &season.total_rebounds,
                    &season.assists,
                    &season.steals,
                    &season.blocks,
                    &season.turnovers,
                    &season.points,
                ],
            )
            .await
            .map_err(|e| db_error(format!("Failed to insert athlete season: {}", e)))?;
        Ok(())
    }

    /// Athlete stat lines ordered by year ascending, the order the trend
    /// predictor expects.
    pub async fn get_athlete_seasons(
        &self,
        athlete_id: i64,
    ) -> Result<Vec<AthleteSeason>, DbError> {
        let rows = self
            .client
            .query(
                "SELECT year, games_played, minutes_played, field_goal_percentage,
                        free_throw_percentage, total_rebounds, assists, steals,
                        blocks, turnovers, points
                 FROM athlete_stats
                 WHERE athlete_id = $1
                 ORDER BY year ASC",
                &[&athlete_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query athlete seasons: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| AthleteSeason {
                year: row.get(0),
                games_played: row.get(1),
                minutes_played: row.get(2),
                field_goal_percentage: row.get(3),
                free_throw_percentage: row.get(4),
                total_rebounds: row.get(5),
                assists: row.get(6),
                steals: row.get(7),
                blocks: row.get(8),
                turnovers: row.get(9),
                points: row.get(10),
            })
            .collect())
    }

    /// Population-wide maximum per athlete statistic, used as normalization
    /// ceilings. Missing statistics (empty table) come back as 0.
    pub async fn athlete_max_values(&self) -> Result<HashMap<AthleteStat, f64>, DbError> {
        let row = self
            .client
            .query_one(
                "SELECT COALESCE(MAX(games_played), 0), COALESCE(MAX(minutes_played), 0),
                        COALESCE(MAX(field_goal_percentage), 0), COALESCE(MAX(free_throw_percentage), 0),
                        COALESCE(MAX(total_rebounds), 0), COALESCE(MAX(assists), 0),
                        COALESCE(MAX(steals), 0), COALESCE(MAX(blocks), 0),
                        COALESCE(MAX(turnovers), 0), COALESCE(MAX(points), 0)
                 FROM athlete_stats",
                &[],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query athlete maxima: {}", e)))?;

        let mut max_values = HashMap::new();
        for (index, &stat) in AthleteStat::ALL.iter().enumerate() {
            max_values.insert(stat, row.get::<_, f64>(index));
        }
        Ok(max_values)
    }

    // ---- games ----

    pub async fn create_game(&self, game: &NewGame) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO games (
                    home, away, winner, date,
                    pts_home, pts_away, reb_home, reb_away, ast_home, ast_away,
                    stl_home, stl_away, blk_home, blk_away
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
                RETURNING game_id",
                &[
                    &game.home,
                    &game.away,
                    &game.winner,
                    &game.date,
                    &game.pts_home,
                    &game.pts_away,
                    &game.reb_home,
                    &game.reb_away,
                    &game.ast_home,
                    &game.ast_away,
                    &game.stl_home,
                    &game.stl_away,
                    &game.blk_home,
                    &game.blk_away,
                ],
            )
            .await
            .map_err(|e| db_error(format!("Failed to create game: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn get_game(&self, game_id: i64) -> Result<Game, DbError> {
        let rows = self
            .client
            .query(
                &format!("{} WHERE game_id = $1", GAME_SELECT),
                &[&game_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query game: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("Game {} not found", game_id)))?;
        Ok(game_from_row(row))
    }

    /// All games a team appeared in, home or away.
    pub async fn get_team_games(&self, team_id: i64) -> Result<Vec<Game>, DbError> {
        let rows = self
            .client
            .query(
                &format!("{} WHERE home = $1 OR away = $1", GAME_SELECT),
                &[&team_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query team games: {}", e)))?;

        Ok(rows.iter().map(game_from_row).collect())
    }

    /// A team's games in the season ending in `year`: October of the prior
    /// calendar year through September of `year`.
    pub async fn get_team_season_games(
        &self,
        team_id: i64,
        year: i32,
    ) -> Result<Vec<Game>, DbError> {
        let rows = self
            .client
            .query(
                &format!(
                    "{} WHERE (home = $1 OR away = $1)
                        AND ((EXTRACT(YEAR FROM date)::int = $2 AND EXTRACT(MONTH FROM date) < 10)
                          OR (EXTRACT(YEAR FROM date)::int = $2 - 1 AND EXTRACT(MONTH FROM date) >= 10))",
                    GAME_SELECT
                ),
                &[&team_id, &year],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query season games: {}", e)))?;

        Ok(rows.iter().map(game_from_row).collect())
    }

    // ---- ratings ----

    pub async fn add_team_rating(&self, team_id: i64, rating: i32) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO team_ratings (team_id, rating)
                 VALUES ($1, $2)
                 RETURNING team_rating_id",
                &[&team_id, &rating],
            )
            .await
            .map_err(|e| db_error(format!("Failed to add team rating: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn add_athlete_rating(&self, athlete_id: i64, rating: i32) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO athlete_ratings (athlete_id, rating)
                 VALUES ($1, $2)
                 RETURNING athlete_rating_id",
                &[&athlete_id, &rating],
            )
            .await
            .map_err(|e| db_error(format!("Failed to add athlete rating: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn get_team_ratings(&self, team_id: i64) -> Result<Vec<i32>, DbError> {
        let rows = self
            .client
            .query(
                "SELECT rating FROM team_ratings WHERE team_id = $1",
                &[&team_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query team ratings: {}", e)))?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    pub async fn get_athlete_ratings(&self, athlete_id: i64) -> Result<Vec<i32>, DbError> {
        let rows = self
            .client
            .query(
                "SELECT rating FROM athlete_ratings WHERE athlete_id = $1",
                &[&athlete_id],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query athlete ratings: {}", e)))?;
        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    // ---- users ----

    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, DbError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO users (username, password)
                 VALUES ($1, $2)
                 RETURNING user_id",
                &[&username, &password_hash],
            )
            .await
            .map_err(|e| db_error(format!("Failed to create user: {}", e)))?;
        Ok(row.get(0))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, DbError> {
        let rows = self
            .client
            .query(
                "SELECT user_id, username, password FROM users WHERE username = $1",
                &[&username],
            )
            .await
            .map_err(|e| db_error(format!("Failed to query user: {}", e)))?;

        let row = rows
            .first()
            .ok_or_else(|| not_found(format!("User {} not found", username)))?;
        Ok(User {
            user_id: row.get(0),
            username: row.get(1),
            password_hash: row.get(2),
        })
    }
}

const GAME_SELECT: &str = "SELECT game_id, home, away, winner, date,
        pts_home, pts_away, reb_home, reb_away, ast_home, ast_away,
        stl_home, stl_away, blk_home, blk_away
 FROM games";

fn game_from_row(row: &Row) -> Game {
    Game {
        game_id: row.get(0),
        home: row.get(1),
        away: row.get(2),
        winner: row.get(3),
        date: row.get(4),
        pts_home: row.get(5),
        pts_away: row.get(6),
        reb_home: row.get(7),
        reb_away: row.get(8),
        ast_home: row.get(9),
        ast_away: row.get(10),
        stl_home: row.get(11),
        stl_away: row.get(12),
        blk_home: row.get(13),
        blk_away: row.get(14),
    }
}
