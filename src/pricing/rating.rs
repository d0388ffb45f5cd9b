//! User rating aggregation.

use crate::common::math::mean;

/// Rating assumed when a subject has no ratings: the midpoint of the 1-5
/// scale, encoding "no opinion" rather than failing the prediction.
pub const NEUTRAL_RATING: f64 = 3.0;

/// Arithmetic mean of 1-5 integer ratings, or [`NEUTRAL_RATING`] when empty.
pub fn mean_rating(ratings: &[i32]) -> f64 {
    let values: Vec<f64> = ratings.iter().map(|&r| r as f64).collect();
    mean(&values).unwrap_or(NEUTRAL_RATING)
}
