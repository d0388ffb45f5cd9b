//! Error taxonomy for the prediction engine.

use thiserror::Error;

/// Failures detected before any partial output is produced.
///
/// All variants are deterministic for a given input; retrying with the same
/// data yields the same error.
// `Domain` carries an f64, so equality stops at `PartialEq`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    /// No observations supplied; nothing to extrapolate from.
    #[error("no historical observations supplied")]
    EmptyInput,

    /// A single observation, or all observations sharing one time key, makes
    /// the regression denominator zero.
    #[error("at least two seasons of data required")]
    InsufficientData,

    /// A normalized-prediction key has no matching weight. Indicates a
    /// mismatch between the pricing policy and the statistic set.
    #[error("no weight configured for statistic `{0}`")]
    MissingWeight(&'static str),

    /// The weighted sum dropped to -1 or below, so `(1 + weighted_sum)` is
    /// non-positive and fractional exponentiation leaves the real domain.
    #[error("weighted sum {0} out of domain for exponentiation")]
    Domain(f64),
}
