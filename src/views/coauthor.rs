//! Advisor and student co-authorship during the student period.
//!
//! For every advisor pair whose student has a known student year, the weight
//! is the number of publications the two co-authored in that year, scaled by
//! half and capped at 1 so the row stays a probability. Pairs with no
//! qualifying co-publication produce no row.

use crate::db::BaseDb;
use crate::engine::store::TupleKey;

/// Two co-publications in the student year count as certainty.
const COPUBS_PER_CERTAINTY: f64 = 2.0;

/// Derives the advised co-authorship rows.
pub fn derive(db: &BaseDb) -> Vec<(TupleKey, f64)> {
    let mut rows = Vec::new();

    for adv in db.advisors() {
        let Some(student) = db.student(adv.aid2) else {
            continue;
        };
        let (Some(advisor_pubs), Some(student_pubs)) =
            (db.publications_of(adv.aid1), db.publications_of(adv.aid2))
        else {
            continue;
        };

        let shared = advisor_pubs
            .intersection(student_pubs)
            .filter(|&&pid| db.publication_year(pid) == Some(student.year))
            .count();
        if shared == 0 {
            continue;
        }

        let weight = (shared as f64 / COPUBS_PER_CERTAINTY).min(1.0);
        rows.push((TupleKey::Pair(adv.aid1, adv.aid2), weight));
    }

    rows
}
