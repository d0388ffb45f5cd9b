//! Statically typed season observations.
//!
//! Statistic sets are compile-time enumerations rather than string-keyed maps,
//! so identifying fields (ids, ages, season labels) can never leak into a
//! regression: they simply are not members of the key enum.

use std::fmt::Debug;
use std::hash::Hash;

/// A closed set of statistic keys for one kind of subject (team or athlete).
pub trait StatKey: Copy + Eq + Hash + Debug + 'static {
    /// Every key, in a fixed order.
    const ALL: &'static [Self];

    /// Stable name used in API payloads and error messages.
    fn name(&self) -> &'static str;
}

/// One season's worth of statistics for a single subject.
pub trait Observation {
    type Key: StatKey;

    /// The season identifier the regression runs against (e.g. 2023).
    fn time_key(&self) -> f64;

    /// Value of one statistic in this season.
    fn value(&self, key: Self::Key) -> f64;
}
