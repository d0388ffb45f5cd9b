//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::auth;
use crate::db::{Database, DbError};
use crate::metrics::Metrics;
use crate::models::athlete::{self, AthleteSeason};
use crate::models::game::NewGame;
use crate::models::team::{self, SeasonRecord, TeamObservation};
use crate::pricing::{mean_rating, price_next_season, PredictionError};
use crate::stats::{season_label, season_record, team_totals, CompareMetric, StatsError};

/// Seasons covered by the recorded game data.
const SEASON_YEARS: std::ops::RangeInclusive<i32> = 2019..=2023;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub database: Option<Arc<Database>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "courtside-api"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

fn require_db(state: &AppState) -> Result<&Arc<Database>, StatusCode> {
    state
        .database
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

fn db_status(e: &DbError) -> StatusCode {
    if e.to_string().contains("not found") {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn prediction_status(e: &PredictionError) -> StatusCode {
    match e {
        // Not enough history is the caller's data problem
        PredictionError::EmptyInput | PredictionError::InsufficientData => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PredictionError::MissingWeight(_) | PredictionError::Domain(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// ---- teams ----

#[derive(Debug, Deserialize)]
struct CreateTeamRequest {
    team_name: String,
    team_abbrev: String,
}

async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let team_id = db
        .create_team(&request.team_name, &request.team_abbrev)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create team");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({ "team_id": team_id })))
}

#[derive(Debug, Deserialize)]
struct TeamQuery {
    year: Option<i32>,
}

#[derive(Debug, Serialize)]
struct TeamResponse {
    team_id: i64,
    team_name: String,
    team_stats: Vec<SeasonRecord>,
}

/// Per-season records for one team. Seasons with no recorded games are
/// omitted rather than reported as zero-game records.
async fn get_team(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
    Query(params): Query<TeamQuery>,
) -> Result<Json<TeamResponse>, StatusCode> {
    let db = require_db(&state)?;

    if let Some(year) = params.year {
        if !SEASON_YEARS.contains(&year) {
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    let team = db.get_team_by_name(&team_name).await.map_err(|e| {
        error!(error = %e, team = %team_name, "Failed to load team");
        db_status(&e)
    })?;

    let years: Vec<i32> = match params.year {
        Some(year) => vec![year],
        None => SEASON_YEARS.collect(),
    };

    let mut team_stats = Vec::new();
    for year in years {
        let games = db
            .get_team_season_games(team.team_id, year)
            .await
            .map_err(|e| {
                error!(error = %e, team_id = team.team_id, year, "Failed to load season games");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
        match season_record(team.team_id, &season_label(year), &games) {
            Ok(record) => team_stats.push(record),
            Err(StatsError::ZeroGames(_)) => continue,
        }
    }

    if team_stats.is_empty() && params.year.is_some() {
        return Err(StatusCode::NOT_FOUND);
    }

    Ok(Json(TeamResponse {
        team_id: team.team_id,
        team_name: team.team_name,
        team_stats,
    }))
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    team_1: String,
    team_2: String,
    team_3: Option<String>,
    team_4: Option<String>,
    team_5: Option<String>,
    compare_by: Option<CompareMetric>,
}

#[derive(Debug, Serialize)]
struct CompareEntry {
    team_id: i64,
    team_name: String,
    metric: CompareMetric,
    value: f64,
}

/// Compare 2-5 teams by a single metric, best first.
async fn compare_teams(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<Vec<CompareEntry>>, StatusCode> {
    let db = require_db(&state)?;
    let metric = params.compare_by.unwrap_or(CompareMetric::Wins);

    let names: Vec<String> = [
        Some(params.team_1),
        Some(params.team_2),
        params.team_3,
        params.team_4,
        params.team_5,
    ]
    .into_iter()
    .flatten()
    .collect();

    let seasons = SEASON_YEARS.count() as u32;
    let mut entries = Vec::new();
    for name in names {
        let team = db.get_team_by_name(&name).await.map_err(|e| {
            error!(error = %e, team = %name, "Failed to load team for comparison");
            db_status(&e)
        })?;
        let games = db.get_team_games(team.team_id).await.map_err(|e| {
            error!(error = %e, team_id = team.team_id, "Failed to load team games");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        let totals = team_totals(team.team_id, &games);
        entries.push(CompareEntry {
            team_id: team.team_id,
            team_name: team.team_name,
            metric,
            value: totals.metric(metric, seasons),
        });
    }

    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    Ok(Json(entries))
}

// ---- athletes ----

#[derive(Debug, Deserialize)]
struct CreateAthleteRequest {
    name: String,
    age: i32,
    team_id: Option<i64>,
}

async fn create_athlete(
    State(state): State<AppState>,
    Json(request): Json<CreateAthleteRequest>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let athlete_id = db
        .create_athlete(&request.name, request.age, request.team_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create athlete");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({ "athlete_id": athlete_id })))
}

#[derive(Debug, Serialize)]
struct AthleteResponse {
    athlete_id: i64,
    name: String,
    age: i32,
    team_id: Option<i64>,
    seasons: Vec<AthleteSeason>,
}

async fn get_athlete(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
) -> Result<Json<AthleteResponse>, StatusCode> {
    let db = require_db(&state)?;

    let athlete = db.get_athlete(athlete_id).await.map_err(|e| {
        error!(error = %e, athlete_id, "Failed to load athlete");
        db_status(&e)
    })?;
    let seasons = db.get_athlete_seasons(athlete_id).await.map_err(|e| {
        error!(error = %e, athlete_id, "Failed to load athlete seasons");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(AthleteResponse {
        athlete_id: athlete.athlete_id,
        name: athlete.name,
        age: athlete.age,
        team_id: athlete.team_id,
        seasons,
    }))
}

async fn add_athlete_stats(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
    Json(season): Json<AthleteSeason>,
) -> Result<StatusCode, StatusCode> {
    let db = require_db(&state)?;

    // 404 before insert if the athlete does not exist
    db.get_athlete(athlete_id).await.map_err(|e| db_status(&e))?;

    db.insert_athlete_season(athlete_id, &season)
        .await
        .map_err(|e| {
            error!(error = %e, athlete_id, "Failed to insert athlete season");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(StatusCode::CREATED)
}

// ---- games ----

async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<NewGame>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let game_id = db.create_game(&request).await.map_err(|e| {
        error!(error = %e, "Failed to create game");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(json!({ "game_id": game_id })))
}

async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let game = db.get_game(game_id).await.map_err(|e| {
        error!(error = %e, game_id, "Failed to load game");
        db_status(&e)
    })?;

    let home_team = db.get_team_name(game.home).await.map_err(|e| db_status(&e))?;
    let away_team = db.get_team_name(game.away).await.map_err(|e| db_status(&e))?;
    let winner = if game.winner_team() == game.home {
        home_team.clone()
    } else {
        away_team.clone()
    };

    Ok(Json(json!({
        "game_id": game.game_id,
        "home_team": home_team,
        "away_team": away_team,
        "winner": winner,
        "home_team_score": game.pts_home,
        "away_team_score": game.pts_away,
        "date": game.date.to_string(),
    })))
}

// ---- ratings ----

#[derive(Debug, Deserialize)]
struct RatingRequest {
    name: String,
    rating: i32,
}

fn validate_rating(rating: i32) -> Result<(), StatusCode> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

async fn add_team_rating(
    State(state): State<AppState>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<Value>, StatusCode> {
    validate_rating(request.rating)?;
    let db = require_db(&state)?;

    let team = db.get_team_by_name(&request.name).await.map_err(|e| {
        error!(error = %e, team = %request.name, "Failed to resolve team for rating");
        db_status(&e)
    })?;
    let team_rating_id = db
        .add_team_rating(team.team_id, request.rating)
        .await
        .map_err(|e| {
            error!(error = %e, team_id = team.team_id, "Failed to add team rating");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({ "team_rating_id": team_rating_id })))
}

async fn add_athlete_rating(
    State(state): State<AppState>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<Value>, StatusCode> {
    validate_rating(request.rating)?;
    let db = require_db(&state)?;

    let athlete_id = db
        .get_athlete_id_by_name(&request.name)
        .await
        .map_err(|e| {
            error!(error = %e, athlete = %request.name, "Failed to resolve athlete for rating");
            db_status(&e)
        })?;
    let athlete_rating_id = db
        .add_athlete_rating(athlete_id, request.rating)
        .await
        .map_err(|e| {
            error!(error = %e, athlete_id, "Failed to add athlete rating");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({ "athlete_rating_id": athlete_rating_id })))
}

// ---- users ----

#[derive(Debug, Deserialize)]
struct UserInfoRequest {
    username: String,
    password: String,
}

async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<UserInfoRequest>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let password_hash = auth::hash_password(&request.password).map_err(|e| {
        error!(error = %e, "Password hashing failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let user_id = db
        .create_user(&request.username, &password_hash)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create user");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(json!({ "user_id": user_id })))
}

/// Yes-or-no password check; no session or token is issued.
async fn login_user(
    State(state): State<AppState>,
    Json(request): Json<UserInfoRequest>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let user = db
        .get_user_by_username(&request.username)
        .await
        .map_err(|e| match db_status(&e) {
            // An unknown username is indistinguishable from a bad password
            StatusCode::NOT_FOUND => StatusCode::UNAUTHORIZED,
            status => status,
        })?;

    if auth::verify_password(&request.password, &user.password_hash) {
        Ok(Json(json!({ "user_id": user.user_id })))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

// ---- predictions ----

async fn predict_team(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let team = db.get_team_by_name(&team_name).await.map_err(|e| {
        error!(error = %e, team = %team_name, "Failed to load team for prediction");
        db_status(&e)
    })?;

    let mut observations = Vec::new();
    for year in SEASON_YEARS {
        let games = db
            .get_team_season_games(team.team_id, year)
            .await
            .map_err(|e| {
                error!(error = %e, team_id = team.team_id, year, "Failed to load season games");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
        match season_record(team.team_id, &season_label(year), &games) {
            Ok(record) => observations.push(TeamObservation::from_record(year, &record)),
            Err(StatsError::ZeroGames(_)) => continue,
        }
    }

    let ratings = db.get_team_ratings(team.team_id).await.map_err(|e| {
        error!(error = %e, team_id = team.team_id, "Failed to load team ratings");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let policy = team::pricing_policy();
    let market_price = price_next_season(&observations, &policy, mean_rating(&ratings))
        .map_err(|e| {
            error!(error = %e, team_id = team.team_id, "Team market price computation failed");
            prediction_status(&e)
        })?;

    Ok(Json(json!({ "market_price": market_price })))
}

async fn predict_athlete(
    State(state): State<AppState>,
    Path(athlete_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let db = require_db(&state)?;

    let athlete = db.get_athlete(athlete_id).await.map_err(|e| {
        error!(error = %e, athlete_id, "Failed to load athlete for prediction");
        db_status(&e)
    })?;
    let observations = db.get_athlete_seasons(athlete_id).await.map_err(|e| {
        error!(error = %e, athlete_id, "Failed to load athlete seasons");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let max_values = db.athlete_max_values().await.map_err(|e| {
        error!(error = %e, "Failed to load athlete maxima");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let ratings = db.get_athlete_ratings(athlete_id).await.map_err(|e| {
        error!(error = %e, athlete_id, "Failed to load athlete ratings");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let policy = athlete::pricing_policy(max_values);
    let market_price = price_next_season(&observations, &policy, mean_rating(&ratings))
        .map_err(|e| {
            error!(error = %e, athlete_id = athlete.athlete_id, "Athlete market price computation failed");
            prediction_status(&e)
        })?;

    Ok(Json(json!({ "market_price": market_price })))
}

#[derive(Debug, Deserialize)]
struct IsolatedTeamRequest {
    seasons: Vec<TeamObservation>,
    mean_rating: f64,
}

/// Market price from caller-supplied team seasons; no database involved.
async fn predict_team_isolated(
    Json(request): Json<IsolatedTeamRequest>,
) -> Result<Json<Value>, StatusCode> {
    let policy = team::pricing_policy();
    let market_price = price_next_season(&request.seasons, &policy, request.mean_rating)
        .map_err(|e| {
            error!(error = %e, "Isolated team market price computation failed");
            prediction_status(&e)
        })?;

    Ok(Json(json!({ "market_price": market_price })))
}

#[derive(Debug, Deserialize)]
struct IsolatedAthleteRequest {
    seasons: Vec<AthleteSeason>,
    max_values: std::collections::HashMap<String, f64>,
    mean_rating: f64,
}

/// Market price from caller-supplied athlete seasons and population maxima.
async fn predict_athlete_isolated(
    Json(request): Json<IsolatedAthleteRequest>,
) -> Result<Json<Value>, StatusCode> {
    use crate::models::athlete::AthleteStat;
    use crate::pricing::StatKey;

    let mut max_values = std::collections::HashMap::new();
    for &stat in AthleteStat::ALL {
        let max = request.max_values.get(stat.name()).copied().unwrap_or(0.0);
        max_values.insert(stat, max);
    }

    let policy = athlete::pricing_policy(max_values);
    let market_price = price_next_season(&request.seasons, &policy, request.mean_rating)
        .map_err(|e| {
            error!(error = %e, "Isolated athlete market price computation failed");
            prediction_status(&e)
        })?;

    Ok(Json(json!({ "market_price": market_price })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/teams", post(create_team))
        .route("/teams/compare", get(compare_teams))
        .route("/teams/{name}", get(get_team))
        .route("/athletes", post(create_athlete))
        .route("/athletes/{id}", get(get_athlete))
        .route("/athletes/{id}/stats", post(add_athlete_stats))
        .route("/games", post(create_game))
        .route("/games/{id}", get(get_game))
        .route("/ratings/team", post(add_team_rating))
        .route("/ratings/athlete", post(add_athlete_rating))
        .route("/users", post(register_user))
        .route("/users/login", post(login_user))
        .route("/predictions/team/{name}", get(predict_team))
        .route("/predictions/athlete/{id}", get(predict_athlete))
        .route("/predictions/team", post(predict_team_isolated))
        .route("/predictions/athlete", post(predict_athlete_isolated))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    // The API still serves the isolated prediction endpoints without a
    // database; storage-backed routes answer 503.
    let database = match Database::new().await {
        Ok(db) => {
            info!("PostgreSQL connected for API server");
            Some(Arc::new(db))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to connect to PostgreSQL - storage-backed endpoints will be unavailable");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics: metrics.clone(),
        start_time: start_time.clone(),
        database,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
