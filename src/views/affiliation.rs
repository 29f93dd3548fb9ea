//! Affiliation correlation from recent co-authorship.
//!
//! Two distinct authors at the same institution who co-authored more than
//! [`MIN_SHARED_PUBLICATIONS`] distinct publications after the cutoff year
//! get a row weighted by their distinct co-publication count, scaled by
//! [`PUBLICATION_SCORE_SCALE`] and capped at 1.

use crate::db::BaseDb;
use crate::engine::store::TupleKey;

/// Publications strictly after this year count as recent.
const RECENT_YEAR_CUTOFF: i32 = 2004;

/// A pair needs strictly more than this many shared recent publications.
const MIN_SHARED_PUBLICATIONS: usize = 2;

/// Divisor turning a co-publication count into a probability.
const PUBLICATION_SCORE_SCALE: f64 = 5.0;

/// Derives the affiliation correlation rows.
pub fn derive(db: &BaseDb) -> Vec<(TupleKey, f64)> {
    let mut rows = Vec::new();

    for first in db.affiliations() {
        for second in db.affiliations() {
            if first.aid == second.aid || first.inst != second.inst {
                continue;
            }
            let (Some(first_pubs), Some(second_pubs)) =
                (db.publications_of(first.aid), db.publications_of(second.aid))
            else {
                continue;
            };

            let shared = first_pubs
                .intersection(second_pubs)
                .filter(|&&pid| {
                    db.publication_year(pid)
                        .is_some_and(|year| year > RECENT_YEAR_CUTOFF)
                })
                .count();
            if shared <= MIN_SHARED_PUBLICATIONS {
                continue;
            }

            let weight = (shared as f64 / PUBLICATION_SCORE_SCALE).min(1.0);
            rows.push((
                TupleKey::Labeled(first.aid, second.aid, first.inst.clone()),
                weight,
            ));
        }
    }

    rows
}
