//! Error types for store construction and query evaluation.

use thiserror::Error;

/// Errors that can occur while transforming weights or evaluating queries.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MvError {
    /// A raw weight outside `[0, 1]` was presented to the odds transform.
    ///
    /// Weights are probabilities; anything else is rejected outright rather
    /// than clamped, so callers cannot feed the engine values that change
    /// the logical meaning of a tuple.
    #[error("weight {0} outside [0, 1]")]
    WeightDomain(f64),

    /// Snapshot serialization or compatibility failure.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Internal invariant violation.
    ///
    /// Used only for programmer errors, not user errors.
    #[error("internal error: {0}")]
    Internal(String),
}
