//! Prediction normalization against population maxima.

use std::collections::HashMap;

use crate::pricing::observation::StatKey;

/// Scale each prediction by the known ceiling for that statistic.
///
/// The output is keyed by `max_values`, not by `predictions`: a statistic with
/// no prediction, a missing ceiling, or a zero ceiling contributes exactly 0.
/// Values are not clamped, so a prediction beating the historical maximum
/// yields a normalized value above 1 on purpose.
pub fn normalize_predictions<K: StatKey>(
    predictions: &HashMap<K, f64>,
    max_values: &HashMap<K, f64>,
) -> HashMap<K, f64> {
    max_values
        .iter()
        .map(|(&key, &max)| {
            let normalized = match predictions.get(&key) {
                Some(&prediction) if max != 0.0 => prediction / max,
                _ => 0.0,
            };
            (key, normalized)
        })
        .collect()
}
