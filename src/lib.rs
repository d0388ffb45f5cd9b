//! Courtside: basketball statistics API with market-price predictions.
//!
//! The service stores teams, athletes, games, season stat lines, user ratings,
//! and user accounts in PostgreSQL, and derives a naive "market price" for a
//! team or athlete by extrapolating per-statistic linear trends and folding in
//! the mean user rating.

pub mod auth;
pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pricing;
pub mod stats;
