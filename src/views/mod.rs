//! View derivations over the base database.
//!
//! Each view walks the base tables and emits raw `(key, weight)` rows for
//! one relation of the store:
//! - **coauthor**: advisor and student co-authorship during the student period
//! - **conflict**: an advisor advising two distinct students (hard constraint)
//! - **affiliation**: frequent recent co-authors sharing an institution
//!
//! Derivation is read-only over the database; materializing the rows into
//! the store is the engine's job.

pub mod affiliation;
pub mod coauthor;
pub mod conflict;

use crate::db::BaseDb;
use crate::engine::store::{RelationKind, TupleKey};

/// Derives all three views, pairing each row batch with its target relation.
pub fn derive_all(db: &BaseDb) -> [(RelationKind, Vec<(TupleKey, f64)>); 3] {
    [
        (RelationKind::AdvisedCoauthor, coauthor::derive(db)),
        (RelationKind::AdvisorConflict, conflict::derive(db)),
        (RelationKind::AffiliationMatch, affiliation::derive(db)),
    ]
}
