//! Unit tests for the rating aggregator

use courtside::pricing::mean_rating;
use courtside::pricing::rating::NEUTRAL_RATING;

#[test]
fn mean_of_ratings() {
    assert_eq!(mean_rating(&[1, 5, 3]), 3.0);
    assert_eq!(mean_rating(&[4, 5]), 4.5);
}

#[test]
fn empty_ratings_default_to_neutral() {
    assert_eq!(mean_rating(&[]), NEUTRAL_RATING);
    assert_eq!(mean_rating(&[]), 3.0);
}

#[test]
fn single_rating_is_its_own_mean() {
    assert_eq!(mean_rating(&[5]), 5.0);
}
