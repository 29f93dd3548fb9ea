//! End-to-end pipeline over the sample database.

use approx::assert_relative_eq;

use markoview::{
    build_store_with_summaries, query_probability, AuthorId, EvalMode, Predicate, RelationKind,
    TupleKey,
};

#[test]
fn sample_pipeline_materializes_expected_relations() {
    let db = markoview::db::sample_db();
    let (store, summaries) = build_store_with_summaries(&db);

    assert_eq!(summaries[0].inserted, 1);
    assert_eq!(summaries[1].inserted, 2);
    assert_eq!(summaries[2].inserted, 2);
    assert!(summaries.iter().all(|s| s.skipped == 0 && s.duplicates == 0));

    // Alice advised Bob and they co-published enough for certainty.
    let coauthor = store.relation(RelationKind::AdvisedCoauthor);
    let key = TupleKey::Pair(AuthorId(1), AuthorId(2));
    assert_eq!(coauthor.get(&key).unwrap().raw_weight, 1.0);

    // Alice advises two students, both orderings recorded as constraints.
    let conflicts = store.relation(RelationKind::AdvisorConflict);
    assert_eq!(conflicts.len(), 2);
    assert!(conflicts.tuples().iter().all(|t| t.raw_weight == 0.0));

    // Alice and Bob share University A and three recent co-publications.
    let affiliations = store.relation(RelationKind::AffiliationMatch);
    assert_eq!(affiliations.len(), 2);
    for tuple in affiliations.tuples() {
        assert_eq!(tuple.key.inst(), Some("University A"));
        assert_relative_eq!(tuple.raw_weight, 0.6, max_relative = 1e-12);
    }
}

#[test]
fn demo_query_is_certain_in_both_modes() {
    let db = markoview::db::sample_db();
    let (store, _) = build_store_with_summaries(&db);
    let query = Predicate::author_pair(AuthorId(1), AuthorId(2));

    // The co-authorship view derives certainty for the pair, so both the
    // saturating plain mode and the short-circuiting robust mode agree.
    assert_eq!(query_probability(&store, EvalMode::Plain, &query), 1.0);
    assert_eq!(query_probability(&store, EvalMode::Robust, &query), 1.0);
}

#[test]
fn unmatched_query_splits_the_modes() {
    let db = markoview::db::sample_db();
    let (store, _) = build_store_with_summaries(&db);
    let query = Predicate::author_pair(AuthorId(3), AuthorId(4));

    // Nothing in the store mentions the pair (3, 4). The plain baseline is
    // degenerate (the store holds certainty and hard constraints), so plain
    // mode saturates; robust mode renormalizes and lands at zero.
    assert_eq!(query_probability(&store, EvalMode::Plain, &query), 1.0);
    assert_eq!(query_probability(&store, EvalMode::Robust, &query), 0.0);
}

#[test]
fn relation_scoped_queries_select_single_views() {
    let db = markoview::db::sample_db();
    let (store, _) = build_store_with_summaries(&db);

    let in_conflicts = Predicate::Test(markoview::KeyTest::Relation(
        RelationKind::AdvisorConflict,
    ))
    .and(Predicate::Test(markoview::KeyTest::Aid3(AuthorId(2))));

    // Exactly one conflict triple ends in author 2.
    let matches: usize = store
        .iter_tuples()
        .filter(|(kind, t)| in_conflicts.matches(*kind, &t.key))
        .count();
    assert_eq!(matches, 1);
}
