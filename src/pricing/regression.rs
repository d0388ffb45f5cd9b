//! Per-statistic linear trend extrapolation.

use std::collections::HashMap;

use crate::common::math::mean;
use crate::pricing::error::PredictionError;
use crate::pricing::observation::{Observation, StatKey};

/// Fit a least-squares line against time for every statistic and extrapolate
/// to `target_time`.
///
/// Requires at least two observations with distinct time keys; with fewer the
/// slope denominator is zero and the fit is undefined, which is rejected
/// upfront rather than surfaced as NaN.
pub fn predict<O: Observation>(
    observations: &[O],
    target_time: f64,
) -> Result<HashMap<O::Key, f64>, PredictionError> {
    if observations.is_empty() {
        return Err(PredictionError::EmptyInput);
    }

    let xs: Vec<f64> = observations.iter().map(Observation::time_key).collect();
    let x_mean = mean(&xs).ok_or(PredictionError::EmptyInput)?;
    let denominator: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
    if denominator == 0.0 {
        return Err(PredictionError::InsufficientData);
    }

    let mut predictions = HashMap::with_capacity(O::Key::ALL.len());
    for &key in O::Key::ALL {
        let ys: Vec<f64> = observations.iter().map(|o| o.value(key)).collect();
        let y_mean = mean(&ys).ok_or(PredictionError::EmptyInput)?;
        let numerator: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();
        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;
        predictions.insert(key, intercept + slope * target_time);
    }

    Ok(predictions)
}
