//! Market-price prediction engine.
//!
//! Pure computation, no I/O: a sequence of per-season observations is fitted
//! with per-statistic linear regression ([`regression`]), the extrapolated
//! values are scaled against known maxima ([`normalize`]), and the weighted
//! result is combined with a mean user rating into a single scalar
//! ([`market`]). Every function here is deterministic over its inputs and safe
//! to call concurrently.

pub mod error;
pub mod market;
pub mod normalize;
pub mod observation;
pub mod rating;
pub mod regression;

pub use error::PredictionError;
pub use market::{market_price, PricingPolicy};
pub use normalize::normalize_predictions;
pub use observation::{Observation, StatKey};
pub use rating::mean_rating;
pub use regression::predict;

/// Full pipeline: regress the observations, extrapolate one season past the
/// newest one, normalize against the policy ceilings, and price with the
/// policy weights and the mean rating.
pub fn price_next_season<O: Observation>(
    observations: &[O],
    policy: &market::PricingPolicy<O::Key>,
    mean_rating: f64,
) -> Result<f64, PredictionError> {
    let target_time = observations
        .iter()
        .map(Observation::time_key)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;
    let predictions = regression::predict(observations, target_time)?;
    let normalized = normalize::normalize_predictions(&predictions, &policy.max_values);
    market::market_price(&policy.weights, &normalized, mean_rating)
}
