//! Unit tests for prediction normalization

use std::collections::HashMap;

use courtside::models::team::TeamStat;
use courtside::pricing::normalize_predictions;

#[test]
fn divides_prediction_by_ceiling() {
    let predictions = HashMap::from([(TeamStat::Wins, 41.0)]);
    let max_values = HashMap::from([(TeamStat::Wins, 82.0)]);
    let normalized = normalize_predictions(&predictions, &max_values);
    assert!((normalized[&TeamStat::Wins] - 0.5).abs() < 1e-9);
}

#[test]
fn doubling_the_ceiling_halves_the_value() {
    let predictions = HashMap::from([(TeamStat::Wins, 41.0)]);
    let single = normalize_predictions(&predictions, &HashMap::from([(TeamStat::Wins, 82.0)]));
    let double = normalize_predictions(&predictions, &HashMap::from([(TeamStat::Wins, 164.0)]));
    assert!((single[&TeamStat::Wins] - 2.0 * double[&TeamStat::Wins]).abs() < 1e-9);
}

#[test]
fn output_keys_follow_the_ceiling_map() {
    let predictions = HashMap::from([(TeamStat::Wins, 41.0)]);
    let max_values = HashMap::from([
        (TeamStat::Wins, 82.0),
        (TeamStat::AveragePointsFor, 150.0),
    ]);
    let normalized = normalize_predictions(&predictions, &max_values);
    assert_eq!(normalized.len(), 2);
    // No prediction for the key means zero contribution, not an error
    assert_eq!(normalized[&TeamStat::AveragePointsFor], 0.0);
}

#[test]
fn zero_ceiling_contributes_zero() {
    let predictions = HashMap::from([(TeamStat::Wins, 41.0)]);
    let max_values = HashMap::from([(TeamStat::Wins, 0.0)]);
    let normalized = normalize_predictions(&predictions, &max_values);
    assert_eq!(normalized[&TeamStat::Wins], 0.0);
}

#[test]
fn prediction_above_ceiling_is_not_clamped() {
    let predictions = HashMap::from([(TeamStat::Wins, 100.0)]);
    let max_values = HashMap::from([(TeamStat::Wins, 82.0)]);
    let normalized = normalize_predictions(&predictions, &max_values);
    assert!(normalized[&TeamStat::Wins] > 1.0);
}
