//! Odds transform from view probabilities to independence-compatible weights.
//!
//! Derived view rows carry probabilities that do not live in an independent
//! probability space. Before the evaluator may treat them as independent
//! Bernoulli parameters they are mapped through the odds-against transform
//! `w0 = (1 - p) / p`, which is monotonically decreasing on `(0, 1)`.
//!
//! The boundaries are special: both `p = 0` (a hard constraint) and `p = 1`
//! (certainty) map to the same infinite sentinel. Collapsing an impossible
//! event and a certain event onto one representation is a known weakness of
//! the transform; it is kept exactly as-is here, and the clamped variant
//! below is the documented alternative for callers that need the two cases
//! kept apart.

use crate::engine::errors::MvError;

/// Default clamp width for [`odds_against_clamped`].
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// A transformed weight: finite odds-against, or the boundary sentinel.
///
/// The sentinel is a distinct variant rather than a coerced finite value so
/// that a hard constraint can never be confused with real odds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Odds {
    /// Odds-against value `(1 - p) / p` for `p` strictly inside `(0, 1)`.
    Finite(f64),
    /// Sentinel for `p == 0` and `p == 1`.
    Infinite,
}

impl Odds {
    /// Returns true for the boundary sentinel.
    pub fn is_infinite(self) -> bool {
        matches!(self, Odds::Infinite)
    }

    /// The finite odds value, if any.
    pub fn as_finite(self) -> Option<f64> {
        match self {
            Odds::Finite(w) => Some(w),
            Odds::Infinite => None,
        }
    }

    /// The factor `1 - w0` contributed to a complement product.
    ///
    /// The sentinel contributes a zero factor: a boundary tuple forces the
    /// surrounding product to zero, so the complement product saturates at 1
    /// no matter what else is in the set.
    pub fn complement_factor(self) -> f64 {
        match self {
            Odds::Finite(w) => 1.0 - w,
            Odds::Infinite => 0.0,
        }
    }
}

/// Maps a raw view probability to its odds-against weight.
///
/// Rejects anything outside `[0, 1]` (including NaN) with
/// [`MvError::WeightDomain`]; never clamps.
pub fn odds_against(raw: f64) -> Result<Odds, MvError> {
    if !(0.0..=1.0).contains(&raw) {
        return Err(MvError::WeightDomain(raw));
    }
    if raw == 0.0 || raw == 1.0 {
        return Ok(Odds::Infinite);
    }
    Ok(Odds::Finite((1.0 - raw) / raw))
}

/// Bounded variant of [`odds_against`] that never produces the sentinel.
///
/// The raw probability is clamped into `[epsilon, 1 - epsilon]` before the
/// transform, so the result is always finite (very large near `p = 0`, very
/// small near `p = 1`). Out-of-domain input is still rejected; the clamp only
/// resolves the boundaries, it does not launder invalid weights.
pub fn odds_against_clamped(raw: f64, epsilon: f64) -> Result<f64, MvError> {
    if !(0.0..=1.0).contains(&raw) {
        return Err(MvError::WeightDomain(raw));
    }
    let p = raw.clamp(epsilon, 1.0 - epsilon);
    Ok((1.0 - p) / p)
}
