//! Evaluator behavior on hand-built stores.

use approx::assert_relative_eq;

use markoview::engine::materialize::materialize;
use markoview::{
    AuthorId, EvalMode, Predicate, QueryEvaluator, RelationKind, TupleKey, ViewStore,
};

fn pair(a: u32, b: u32) -> TupleKey {
    TupleKey::Pair(AuthorId(a), AuthorId(b))
}

fn store_with(rows: Vec<(TupleKey, f64)>) -> ViewStore {
    let mut store = ViewStore::new();
    materialize(&mut store, RelationKind::AdvisedCoauthor, rows);
    store
}

#[test]
fn even_odds_single_tuple_saturates_plain_mode() {
    // transform(0.5) = 1.0, so the world product has a zero factor and
    // P0(W) = 1 exactly.
    let store = store_with(vec![(pair(1, 2), 0.5)]);
    let eval = QueryEvaluator::new(&store, EvalMode::Plain);

    assert_eq!(eval.p0_world(), 1.0);
    assert_eq!(
        eval.probability(&Predicate::author_pair(AuthorId(1), AuthorId(2))),
        1.0
    );
}

#[test]
fn query_covering_the_whole_world_cancels_to_zero() {
    // transform(0.8) = 0.25; query and baseline are the same single tuple.
    let store = store_with(vec![(pair(1, 2), 0.8)]);
    let eval = QueryEvaluator::new(&store, EvalMode::Plain);
    let q = Predicate::author_pair(AuthorId(1), AuthorId(2));

    assert_relative_eq!(eval.p0_query_or_world(&q), 0.25, max_relative = 1e-12);
    assert_relative_eq!(eval.p0_world(), 0.25, max_relative = 1e-12);
    assert_eq!(eval.probability(&q), 0.0);
}

#[test]
fn disjoint_tuples_with_degenerate_baseline_saturate() {
    // Weights 0.5 and 0.2 transform to 1.0 and 4.0; the zero factor from the
    // first tuple makes both estimates 1.
    let store = store_with(vec![(pair(1, 2), 0.5), (pair(3, 4), 0.2)]);
    let eval = QueryEvaluator::new(&store, EvalMode::Plain);
    let q = Predicate::author_pair(AuthorId(1), AuthorId(2));

    assert_eq!(eval.p0_query_or_world(&q), 1.0);
    assert_eq!(eval.p0_world(), 1.0);
    assert_eq!(eval.probability(&q), 1.0);
}

#[test]
fn no_matching_tuples_is_a_valid_query() {
    let store = store_with(vec![(pair(1, 2), 0.8)]);
    let nothing = Predicate::author_pair(AuthorId(8), AuthorId(9));

    for mode in [EvalMode::Plain, EvalMode::Robust] {
        let eval = QueryEvaluator::new(&store, mode);
        assert_eq!(eval.p0_query_or_world(&nothing), 0.0);
        let p = eval.probability(&nothing);
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn world_spans_all_three_relations() {
    let mut store = ViewStore::new();
    materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        vec![(pair(1, 2), 0.8)],
    );
    materialize(
        &mut store,
        RelationKind::AdvisorConflict,
        vec![(TupleKey::Triple(AuthorId(1), AuthorId(2), AuthorId(3)), 0.8)],
    );
    materialize(
        &mut store,
        RelationKind::AffiliationMatch,
        vec![(
            TupleKey::Labeled(AuthorId(1), AuthorId(2), "University A".into()),
            0.8,
        )],
    );

    // Three tuples with w0 = 0.25 each: P0(W) = 1 - 0.75^3.
    let eval = QueryEvaluator::new(&store, EvalMode::Plain);
    assert_relative_eq!(eval.p0_world(), 1.0 - 0.75_f64.powi(3), max_relative = 1e-12);

    // A relation-restricted predicate only sees its own tuples.
    let conflict_only = Predicate::Test(markoview::KeyTest::Relation(
        RelationKind::AdvisorConflict,
    ));
    assert_relative_eq!(
        eval.p0_query_or_world(&conflict_only),
        0.25,
        max_relative = 1e-12
    );
}

#[test]
fn plain_and_robust_diverge_on_hard_constraints() {
    let mut store = ViewStore::new();
    materialize(
        &mut store,
        RelationKind::AdvisorConflict,
        vec![(TupleKey::Triple(AuthorId(1), AuthorId(2), AuthorId(3)), 0.0)],
    );
    materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        vec![(pair(4, 5), 0.8)],
    );
    let q = Predicate::author_pair(AuthorId(4), AuthorId(5));

    // Plain mode: the sentinel drives the baseline degenerate, so every
    // query saturates.
    let plain = QueryEvaluator::new(&store, EvalMode::Plain);
    assert_eq!(plain.probability(&q), 1.0);

    // Robust mode: the constraint becomes a huge finite weight; the query
    // tuple contributes almost nothing next to it, so the corrected estimate
    // collapses to the bottom of the range instead.
    let robust = QueryEvaluator::new(&store, EvalMode::Robust);
    let p = robust.probability(&q);
    assert!((0.0..=1.0).contains(&p));
    assert!(p < plain.probability(&q));
}

#[test]
fn robust_certainty_short_circuit_applies_per_tuple_set() {
    let mut store = ViewStore::new();
    materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        vec![(pair(1, 2), 1.0), (pair(3, 4), 0.2)],
    );
    let eval = QueryEvaluator::new(&store, EvalMode::Robust);

    // The certain tuple dominates any set containing it.
    assert_eq!(eval.p0_world(), 1.0);
    assert_eq!(
        eval.p0_query_or_world(&Predicate::author_pair(AuthorId(1), AuthorId(2))),
        1.0
    );
    // A set without it stays ordinary.
    let other = Predicate::author_pair(AuthorId(3), AuthorId(4));
    let p = eval.p0_query_or_world(&other);
    assert!(p.is_finite());
    assert!(p > 1.0, "transform(0.2) = 4.0 pushes the estimate above 1");
}
