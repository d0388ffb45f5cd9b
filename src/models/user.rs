//! User accounts.

/// A registered user. `password_hash` is an argon2 PHC string, never the
/// plain password.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
}
