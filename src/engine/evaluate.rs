//! Query probability evaluation.
//!
//! Estimates `P(Q)` for a selection predicate over the union of the three
//! weighted relations, treating each qualifying tuple's transformed weight as
//! an independent Bernoulli parameter:
//!
//! ```text
//! P0(S)  = 1 - prod over t in S of (1 - w0(t))      (complement product)
//! P(Q)   = (P0(Q or W) - P0(W)) / (1 - P0(W))
//! ```
//!
//! `W` is the implicit event that the union of all derived relationships
//! holds; `P0(W)` is the baseline that the correction subtracts out, removing
//! the bias from reusing the same tuples for the query and the baseline.
//!
//! Two modes run side by side:
//! - **plain**: uses the stored unclamped weights; the boundary sentinel
//!   contributes a zero complement factor, and a degenerate baseline
//!   (`P0(W) >= 1`) saturates the answer to 1.0
//! - **robust**: re-derives weights with the clamped transform, short-circuits
//!   to certainty on any tuple with raw weight exactly 1, and substitutes a
//!   near-1 constant for a degenerate baseline instead of saturating
//!
//! The two modes intentionally diverge on boundary inputs. The evaluator
//! never fails: an empty relation or an empty match is a valid case with
//! complement product exactly 0.

use crate::engine::predicate::Predicate;
use crate::engine::store::{ViewStore, WeightedTuple};
use crate::engine::transform::{odds_against_clamped, DEFAULT_EPSILON};

/// Baseline substituted for `P0(W) >= 1` in robust mode.
pub const ROBUST_BASELINE_CAP: f64 = 0.999999;

/// How tuple weights enter the complement product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalMode {
    /// Stored unclamped weights, zero-factor sentinel, hard saturation.
    Plain,
    /// Clamped weights, certainty short-circuit, near-1 baseline substitute.
    Robust,
}

/// Evaluates query probabilities against a materialized store.
///
/// Holds only a shared borrow of the store; materialization must be complete
/// before evaluation begins.
#[derive(Debug, Clone, Copy)]
pub struct QueryEvaluator<'a> {
    store: &'a ViewStore,
    mode: EvalMode,
    epsilon: f64,
}

impl<'a> QueryEvaluator<'a> {
    /// Creates an evaluator with the default clamp width.
    pub fn new(store: &'a ViewStore, mode: EvalMode) -> Self {
        Self {
            store,
            mode,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Overrides the clamp width used by robust mode.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// The evaluation mode.
    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// The complement product `1 - prod (1 - w0)` over a tuple set.
    ///
    /// Exactly invariant under reordering of the input: the factors are
    /// multiplied in a canonical order, so permuting the tuples cannot even
    /// perturb rounding. An empty set yields exactly 0.
    pub fn complement_product<'t>(
        &self,
        tuples: impl IntoIterator<Item = &'t WeightedTuple>,
    ) -> f64 {
        let mut factors = Vec::new();
        for tuple in tuples {
            match self.mode {
                EvalMode::Plain => {
                    // A tuple the materializer has not transformed yet cannot
                    // contribute a weight.
                    let Some(w0) = tuple.w0 else { continue };
                    factors.push(w0.complement_factor());
                }
                EvalMode::Robust => {
                    if tuple.raw_weight == 1.0 {
                        return 1.0;
                    }
                    let Ok(w) = odds_against_clamped(tuple.raw_weight, self.epsilon) else {
                        continue;
                    };
                    factors.push(1.0 - w);
                }
            }
        }
        factors.sort_unstable_by(f64::total_cmp);
        1.0 - factors.into_iter().product::<f64>()
    }

    /// `P0(Q or W)`: complement product over the tuples, across all three
    /// relations, that satisfy `predicate`.
    pub fn p0_query_or_world(&self, predicate: &Predicate) -> f64 {
        self.complement_product(
            self.store
                .iter_tuples()
                .filter(|(kind, t)| predicate.matches(*kind, &t.key))
                .map(|(_, t)| t),
        )
    }

    /// `P0(W)`: complement product over every tuple in the store.
    pub fn p0_world(&self) -> f64 {
        self.complement_product(self.store.iter_tuples().map(|(_, t)| t))
    }

    /// `P(Q)`: the baseline-corrected probability that the query holds.
    ///
    /// The correction formula can mathematically leave `[0, 1]` when the
    /// independence assumption is inconsistent with the data; the result is
    /// clamped back into the unit interval as approximation error.
    pub fn probability(&self, predicate: &Predicate) -> f64 {
        let a = self.p0_query_or_world(predicate);
        let b = self.p0_world();

        let raw = match self.mode {
            EvalMode::Plain => {
                if b >= 1.0 {
                    return 1.0;
                }
                (a - b) / (1.0 - b)
            }
            EvalMode::Robust => {
                let b = if b >= 1.0 { ROBUST_BASELINE_CAP } else { b };
                (a - b) / (1.0 - b)
            }
        };

        clamp_unit(raw)
    }
}

/// Clamps a correction result into `[0, 1]`.
///
/// The complement products are finite and the degenerate baseline is handled
/// before division, so NaN should be unreachable; the guard is kept so a
/// future weight source cannot leak one to callers.
fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() {
        #[cfg(feature = "tracing")]
        tracing::warn!("correction formula degenerated to NaN, saturating to 1");
        return 1.0;
    }
    p.clamp(0.0, 1.0)
}
