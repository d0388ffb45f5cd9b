pub mod postgres;

pub use postgres::{Database, DbError};
