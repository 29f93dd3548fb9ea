//! Store and materialization behavior through the public API.

use markoview::engine::materialize::materialize;
use markoview::{build_store, AuthorId, RelationKind, TupleKey, ViewStore};

fn pair(a: u32, b: u32) -> TupleKey {
    TupleKey::Pair(AuthorId(a), AuthorId(b))
}

#[test]
fn full_pipeline_is_idempotent() {
    let db = markoview::db::sample_db();
    let first = build_store(&db);
    let second = build_store(&db);

    for kind in RelationKind::ALL {
        assert_eq!(
            first.relation(kind).tuples(),
            second.relation(kind).tuples(),
            "rebuilding from the same database must reproduce {}",
            kind
        );
    }
}

#[test]
fn rematerializing_the_same_view_rows_is_a_noop() {
    let db = markoview::db::sample_db();
    let mut store = build_store(&db);
    let before: Vec<_> = store
        .relation(RelationKind::AdvisedCoauthor)
        .tuples()
        .to_vec();

    let summary = materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        markoview::views::coauthor::derive(&db),
    );

    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.duplicates, before.len());
    assert_eq!(store.relation(RelationKind::AdvisedCoauthor).tuples(), before);
}

#[test]
fn duplicate_keys_keep_the_first_weight() {
    let mut store = ViewStore::new();
    materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        vec![(pair(1, 2), 0.3), (pair(1, 2), 0.7)],
    );

    let rel = store.relation(RelationKind::AdvisedCoauthor);
    assert_eq!(rel.len(), 1);
    assert_eq!(rel.get(&pair(1, 2)).unwrap().raw_weight, 0.3);
}

#[test]
fn out_of_domain_weights_skip_only_their_row() {
    let mut store = ViewStore::new();
    let summary = materialize(
        &mut store,
        RelationKind::AdvisedCoauthor,
        vec![
            (pair(1, 2), -0.5),
            (pair(3, 4), 0.5),
            (pair(5, 6), f64::NAN),
        ],
    );

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.skipped, 2);
    assert!(store.relation(RelationKind::AdvisedCoauthor).contains_key(&pair(3, 4)));
}

#[test]
fn every_materialized_tuple_carries_a_transformed_weight() {
    let db = markoview::db::sample_db();
    let store = build_store(&db);

    for (kind, tuple) in store.iter_tuples() {
        assert!(
            tuple.w0.is_some(),
            "tuple {} in {} was left untransformed",
            tuple.key,
            kind
        );
    }
}
