//! # Markoview - Approximate query probability over weighted relational views
//!
//! Markoview derives approximate marginal probabilities for boolean queries
//! over a probabilistic relational database. Weighted relationships between
//! entities are derived as views over the base data, pulled into a
//! materialized store, and combined under an independence assumption with a
//! baseline-subtraction correction.
//!
//! The derived weights do not live in an independent probability space, so
//! they are first mapped through the odds-against transform `(1 - p) / p`;
//! the evaluator then treats each transformed weight as an independent
//! Bernoulli parameter and corrects the estimate by subtracting out the
//! probability mass of the full derived world.
//!
//! ## Architecture
//!
//! - **db**: In-memory base tables (authors, publications, probabilistic
//!   student/advisor/affiliation rows) plus the bundled sample population
//! - **views**: The three view derivations producing raw `(key, weight)` rows
//! - **engine**: Transform, store, materializer, predicates, and the query
//!   probability evaluator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use markoview::{build_store, AuthorId, EvalMode, Predicate, QueryEvaluator};
//!
//! let db = markoview::db::sample_db();
//! let store = build_store(&db);
//!
//! let query = Predicate::author_pair(AuthorId(1), AuthorId(2));
//! let p = QueryEvaluator::new(&store, EvalMode::Robust).probability(&query);
//! ```

#![forbid(unsafe_code)]

pub mod db;
pub mod engine;
pub mod views;

// Re-export commonly used types
pub use engine::errors::MvError;
pub use engine::evaluate::{EvalMode, QueryEvaluator};
pub use engine::materialize::{materialize, MaterializeSummary};
pub use engine::predicate::{KeyTest, Predicate};
pub use engine::store::{AuthorId, RelationKind, TupleKey, ViewStore, WeightedTuple};
pub use engine::transform::{odds_against, odds_against_clamped, Odds};

/// Derives all three views from the base database and materializes them into
/// a fresh store.
pub fn build_store(db: &db::BaseDb) -> ViewStore {
    build_store_with_summaries(db).0
}

/// Like [`build_store`], but also reports what each batch did.
pub fn build_store_with_summaries(db: &db::BaseDb) -> (ViewStore, [MaterializeSummary; 3]) {
    let mut store = ViewStore::new();
    let summaries = views::derive_all(db)
        .map(|(kind, rows)| engine::materialize::materialize(&mut store, kind, rows));
    (store, summaries)
}

/// Evaluates `P(Q)` for a predicate against a materialized store.
///
/// Convenience wrapper over [`QueryEvaluator`] for one-shot callers.
pub fn query_probability(store: &ViewStore, mode: EvalMode, predicate: &Predicate) -> f64 {
    QueryEvaluator::new(store, mode).probability(predicate)
}
