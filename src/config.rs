//! Environment-based configuration.

use std::env;

/// Deployment environment name, defaulting to `development`.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// PostgreSQL connection string.
///
/// `DATABASE_URL` wins if set; otherwise the URL is assembled from the
/// individual `POSTGRES_*` variables.
pub fn get_database_url() -> String {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url;
    }

    let user = env::var("POSTGRES_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("POSTGRES_PASSWORD").unwrap_or_default();
    let server = env::var("POSTGRES_SERVER").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db = env::var("POSTGRES_DB").unwrap_or_else(|_| "courtside".to_string());

    format!("postgresql://{}:{}@{}:{}/{}", user, password, server, port, db)
}
