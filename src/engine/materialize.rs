//! View materialization.
//!
//! Pulls raw `(key, weight)` rows from a view derivation into one relation of
//! the [`ViewStore`]:
//! - rows whose key already exists are skipped silently (idempotence, not an
//!   error)
//! - new tuples get their transformed weight assigned immediately on insert,
//!   unclamped, with the boundary sentinel preserved
//! - malformed rows (wrong key shape for the relation, weight outside
//!   `[0, 1]`) are logged and skipped without aborting the rest of the batch

use crate::engine::store::{RelationKind, TupleKey, ViewStore, WeightedTuple};
use crate::engine::transform::odds_against;

/// Outcome counts for one materialization batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    /// Tuples newly inserted with a transformed weight.
    pub inserted: usize,
    /// Rows whose key was already present (no-ops).
    pub duplicates: usize,
    /// Malformed rows dropped from the batch.
    pub skipped: usize,
}

/// Materializes one batch of view rows into a single relation.
///
/// Extends exactly one [`WeightedRelation`](crate::engine::store::WeightedRelation);
/// the other two are never touched. Calling this twice with identical input
/// leaves the store in the same state as calling it once.
pub fn materialize(
    store: &mut ViewStore,
    kind: RelationKind,
    rows: impl IntoIterator<Item = (TupleKey, f64)>,
) -> MaterializeSummary {
    let mut summary = MaterializeSummary::default();
    let relation = store.relation_mut(kind);

    for (key, raw_weight) in rows {
        if !kind.admits(&key) {
            #[cfg(feature = "tracing")]
            tracing::warn!("dropping row {} with wrong key shape for {}", key, kind);
            summary.skipped += 1;
            continue;
        }
        if relation.contains_key(&key) {
            #[cfg(feature = "tracing")]
            tracing::debug!("skipping duplicate key {} in {}", key, kind);
            summary.duplicates += 1;
            continue;
        }
        let w0 = match odds_against(raw_weight) {
            Ok(w0) => w0,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("dropping row {} from {}: {}", key, kind, _e);
                summary.skipped += 1;
                continue;
            }
        };
        relation.insert(WeightedTuple {
            key,
            raw_weight,
            w0: Some(w0),
        });
        summary.inserted += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "materialized {}: {} inserted, {} duplicates, {} skipped",
        kind,
        summary.inserted,
        summary.duplicates,
        summary.skipped
    );

    summary
}
