//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and the isolated prediction
//! endpoints (which require no database).

#[path = "api_server/test_utils.rs"]
mod test_utils;

use serde_json::{json, Value};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "courtside-api");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;

    // A first request so the counters have something to report
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn storage_backed_routes_degrade_without_a_database() {
    let app = TestApiServer::new().await;

    let response = app.server.get("/teams/Utah%20Jazz").await;
    assert_eq!(response.status_code(), 503);

    let response = app.server.get("/athletes/1").await;
    assert_eq!(response.status_code(), 503);

    let response = app.server.get("/predictions/team/Utah%20Jazz").await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn isolated_team_prediction_computes_without_a_database() {
    let app = TestApiServer::new().await;

    // Constant stat lines: every regression is flat, so the extrapolated
    // season equals the historical one.
    let seasons: Vec<Value> = (2019..=2023)
        .map(|season| {
            json!({
                "season": season,
                "wins": 41.0,
                "average_points_for": 112.5,
                "average_points_allowed": 112.5,
            })
        })
        .collect();

    let response = app
        .server
        .post("/predictions/team")
        .json(&json!({ "seasons": seasons, "mean_rating": 3.0 }))
        .await;
    assert_eq!(response.status_code(), 200);

    // weighted_sum = 0.7*(41/82) + 0.7*(112.5/150) - 0.4*(112.5/150)
    //              = 0.35 + 0.525 - 0.3 = 0.575
    // market_price = (1.575)^3 = 3.91 (2 decimals)
    let body: Value = response.json();
    let price = body["market_price"].as_f64().expect("price");
    assert!((price - 3.91).abs() < 1e-9);
}

#[tokio::test]
async fn isolated_team_prediction_rejects_a_single_season() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/predictions/team")
        .json(&json!({
            "seasons": [{
                "season": 2023,
                "wins": 41.0,
                "average_points_for": 112.5,
                "average_points_allowed": 112.5,
            }],
            "mean_rating": 3.0,
        }))
        .await;

    // One season cannot be regressed; insufficient historical data
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn isolated_team_prediction_rejects_empty_history() {
    let app = TestApiServer::new().await;

    let response = app
        .server
        .post("/predictions/team")
        .json(&json!({ "seasons": [], "mean_rating": 3.0 }))
        .await;

    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn isolated_athlete_prediction_single_statistic() {
    let app = TestApiServer::new().await;

    let season = |year: i32, points: f64| {
        json!({
            "year": year,
            "games_played": 0.0,
            "minutes_played": 0.0,
            "field_goal_percentage": 0.0,
            "free_throw_percentage": 0.0,
            "total_rebounds": 0.0,
            "assists": 0.0,
            "steals": 0.0,
            "blocks": 0.0,
            "turnovers": 0.0,
            "points": points,
        })
    };

    let response = app
        .server
        .post("/predictions/athlete")
        .json(&json!({
            "seasons": [season(2022, 1000.0), season(2023, 1200.0)],
            "max_values": { "points": 2000.0 },
            "mean_rating": 3.0,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    // Points trend to 1400 in 2024, normalized 0.7 with weight 0.12; the
    // other nine statistics have zero ceilings and contribute nothing.
    // (1 + 0.7*0.12)^3 = (1.084)^3 = 1.27 (2 decimals)
    let body: Value = response.json();
    let price = body["market_price"].as_f64().expect("price");
    assert!((price - 1.27).abs() < 1e-9);
}

#[tokio::test]
async fn isolated_prediction_is_idempotent() {
    let app = TestApiServer::new().await;

    let request = json!({
        "seasons": [
            { "season": 2022, "wins": 30.0, "average_points_for": 105.0, "average_points_allowed": 110.0 },
            { "season": 2023, "wins": 45.0, "average_points_for": 115.0, "average_points_allowed": 108.0 },
        ],
        "mean_rating": 4.0,
    });

    let first = app.server.post("/predictions/team").json(&request).await;
    let second = app.server.post("/predictions/team").json(&request).await;
    assert_eq!(first.status_code(), 200);

    let first: Value = first.json();
    let second: Value = second.json();
    assert_eq!(first["market_price"], second["market_price"]);
}

#[tokio::test]
async fn rating_endpoints_validate_range_before_storage() {
    let app = TestApiServer::new().await;

    // Out-of-range ratings are rejected before storage is consulted
    let response = app
        .server
        .post("/ratings/team")
        .json(&json!({ "name": "Utah Jazz", "rating": 6 }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .server
        .post("/ratings/athlete")
        .json(&json!({ "name": "Nikola Jokic", "rating": 0 }))
        .await;
    assert_eq!(response.status_code(), 400);

    // A valid rating still needs storage, which is not attached here
    let response = app
        .server
        .post("/ratings/team")
        .json(&json!({ "name": "Utah Jazz", "rating": 3 }))
        .await;
    assert_eq!(response.status_code(), 503);
}
