//! Advisor rule violations.
//!
//! An advisor advising two distinct students violates the advising rule; the
//! derived row is a hard constraint with weight 0. Both orderings of the two
//! students are emitted, matching the symmetric self-join this derivation
//! performs.

use crate::db::BaseDb;
use crate::engine::store::TupleKey;

/// Derives the advisor conflict rows.
pub fn derive(db: &BaseDb) -> Vec<(TupleKey, f64)> {
    let mut rows = Vec::new();

    for first in db.advisors() {
        for second in db.advisors() {
            if first.aid1 == second.aid1 && first.aid2 != second.aid2 {
                rows.push((TupleKey::Triple(first.aid1, first.aid2, second.aid2), 0.0));
            }
        }
    }

    rows
}
