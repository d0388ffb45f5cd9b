//! Market-price calculation from normalized, weighted predictions.

use std::collections::HashMap;

use crate::common::math::round2;
use crate::pricing::error::PredictionError;
use crate::pricing::observation::StatKey;

/// Weights and normalization ceilings for one subject kind.
///
/// Presets (the TEAM and ATHLETE statistic sets) are defined next to their
/// stat enums in the models layer; the calculator itself is agnostic to any
/// particular sport-statistic set.
#[derive(Debug, Clone)]
pub struct PricingPolicy<K: StatKey> {
    pub weights: HashMap<K, f64>,
    pub max_values: HashMap<K, f64>,
}

/// Collapse normalized predictions and a mean rating into one scalar.
///
/// `market_price = (1 + weighted_sum) ^ mean_rating`, rounded to two decimals.
/// The rating acts as a confidence multiplier: a higher mean rating amplifies
/// deviation from the neutral base of 1 in either direction.
pub fn market_price<K: StatKey>(
    weights: &HashMap<K, f64>,
    normalized_predictions: &HashMap<K, f64>,
    mean_rating: f64,
) -> Result<f64, PredictionError> {
    let mut weighted_sum = 0.0;
    for (key, normalized) in normalized_predictions {
        let weight = weights
            .get(key)
            .ok_or_else(|| PredictionError::MissingWeight(key.name()))?;
        weighted_sum += normalized * weight;
    }

    // Negative weights (e.g. points allowed) can pull the base non-positive,
    // which would leave the real domain under a fractional exponent.
    if weighted_sum <= -1.0 {
        return Err(PredictionError::Domain(weighted_sum));
    }

    Ok(round2((1.0 + weighted_sum).powf(mean_rating)))
}
