//! # Weighted Tuple Store
//!
//! The materialized form of the derived views: three named relations, each a
//! set of keyed tuples carrying the raw view probability and its transformed
//! odds weight.
//!
//! ## Key Components
//!
//! - **TupleKey**: the identifying attributes of a derived fact; one of the
//!   three key shapes the views produce
//! - **WeightedTuple**: a single derived probabilistic fact
//! - **WeightedRelation**: a homogeneous, key-unique collection of tuples
//! - **ViewStore**: the three relations, unioned logically by the evaluator
//!
//! ## Design
//!
//! Keys are unique within a relation and inserts of an existing key are
//! no-ops, so materialization is idempotent by construction. Lookup goes
//! through an `FxHashMap` index into a dense tuple vector, keeping iteration
//! order deterministic (insertion order) for reproducible evaluation traces.

use rustc_hash::FxHashMap;

use crate::engine::transform::Odds;

/// A unique identifier for an author in the base database.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuthorId(pub u32);

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identifying attributes of a derived tuple.
///
/// Arity and types vary by relation: a pair of author ids, a triple of
/// author ids, or a pair of author ids plus an institution label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TupleKey {
    /// Two author ids, e.g. an advisor and a student.
    Pair(AuthorId, AuthorId),
    /// Three author ids, e.g. an advisor and two of their students.
    Triple(AuthorId, AuthorId, AuthorId),
    /// Two author ids plus an institution label.
    Labeled(AuthorId, AuthorId, String),
}

impl TupleKey {
    /// The first author id (present in every key shape).
    pub fn aid1(&self) -> AuthorId {
        match self {
            TupleKey::Pair(a, _) | TupleKey::Triple(a, _, _) | TupleKey::Labeled(a, _, _) => *a,
        }
    }

    /// The second author id (present in every key shape).
    pub fn aid2(&self) -> AuthorId {
        match self {
            TupleKey::Pair(_, a) | TupleKey::Triple(_, a, _) | TupleKey::Labeled(_, a, _) => *a,
        }
    }

    /// The third author id, for triple keys.
    pub fn aid3(&self) -> Option<AuthorId> {
        match self {
            TupleKey::Triple(_, _, a) => Some(*a),
            _ => None,
        }
    }

    /// The institution label, for labeled keys.
    pub fn inst(&self) -> Option<&str> {
        match self {
            TupleKey::Labeled(_, _, inst) => Some(inst),
            _ => None,
        }
    }
}

impl std::fmt::Display for TupleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TupleKey::Pair(a1, a2) => write!(f, "({}, {})", a1, a2),
            TupleKey::Triple(a1, a2, a3) => write!(f, "({}, {}, {})", a1, a2, a3),
            TupleKey::Labeled(a1, a2, inst) => write!(f, "({}, {}, {})", a1, a2, inst),
        }
    }
}

/// The three derived relations held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationKind {
    /// Advisor and student co-authorship during the student period.
    AdvisedCoauthor,
    /// Advisor advising two distinct students (rule violation, weight 0).
    AdvisorConflict,
    /// Frequent recent co-authors sharing an institution.
    AffiliationMatch,
}

impl RelationKind {
    /// All relation kinds, in store order.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::AdvisedCoauthor,
        RelationKind::AdvisorConflict,
        RelationKind::AffiliationMatch,
    ];

    /// Stable relation name used in logs and snapshots.
    pub fn name(self) -> &'static str {
        match self {
            RelationKind::AdvisedCoauthor => "advised_coauthor",
            RelationKind::AdvisorConflict => "advisor_conflict",
            RelationKind::AffiliationMatch => "affiliation_match",
        }
    }

    /// Whether a key has the shape this relation requires.
    pub fn admits(self, key: &TupleKey) -> bool {
        matches!(
            (self, key),
            (RelationKind::AdvisedCoauthor, TupleKey::Pair(..))
                | (RelationKind::AdvisorConflict, TupleKey::Triple(..))
                | (RelationKind::AffiliationMatch, TupleKey::Labeled(..))
        )
    }

    fn slot(self) -> usize {
        match self {
            RelationKind::AdvisedCoauthor => 0,
            RelationKind::AdvisorConflict => 1,
            RelationKind::AffiliationMatch => 2,
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One derived probabilistic fact.
///
/// `w0` is `None` until the materializer computes it; once set it is never
/// recomputed within a materialization pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedTuple {
    /// The identifying attributes, unique within the relation.
    pub key: TupleKey,
    /// The probability assigned by the originating view, in `[0, 1]`.
    pub raw_weight: f64,
    /// The transformed odds weight used by the evaluator.
    pub w0: Option<Odds>,
}

/// A named, homogeneous collection of weighted tuples with unique keys.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedRelation {
    kind: RelationKind,
    tuples: Vec<WeightedTuple>,
    #[cfg_attr(feature = "serde", serde(skip, default))]
    index: FxHashMap<TupleKey, usize>,
}

impl WeightedRelation {
    /// Creates an empty relation of the given kind.
    pub fn new(kind: RelationKind) -> Self {
        Self {
            kind,
            tuples: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// The relation kind.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Number of tuples in the relation.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// True if the relation holds no tuples.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Whether a tuple with this key has already been materialized.
    pub fn contains_key(&self, key: &TupleKey) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up a tuple by key.
    pub fn get(&self, key: &TupleKey) -> Option<&WeightedTuple> {
        self.index.get(key).map(|&i| &self.tuples[i])
    }

    /// The tuples in insertion order.
    pub fn tuples(&self) -> &[WeightedTuple] {
        &self.tuples
    }

    /// Rebuilds the key index from the tuple vector.
    ///
    /// Needed after deserialization, which restores tuples but not the index.
    pub(crate) fn rebuild_index(&mut self) {
        self.index = self
            .tuples
            .iter()
            .enumerate()
            .map(|(i, t)| (t.key.clone(), i))
            .collect();
    }

    /// Inserts a tuple, returning false (and leaving the relation untouched)
    /// if its key is already present.
    pub(crate) fn insert(&mut self, tuple: WeightedTuple) -> bool {
        if self.index.contains_key(&tuple.key) {
            return false;
        }
        self.index.insert(tuple.key.clone(), self.tuples.len());
        self.tuples.push(tuple);
        true
    }
}

/// The full materialized store: one relation per [`RelationKind`].
///
/// The store is an explicit value owned by the caller; there is no
/// process-wide handle. The materializer is its only mutator.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewStore {
    relations: [WeightedRelation; 3],
}

impl Default for ViewStore {
    fn default() -> Self {
        Self {
            relations: RelationKind::ALL.map(WeightedRelation::new),
        }
    }
}

impl ViewStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows one relation.
    pub fn relation(&self, kind: RelationKind) -> &WeightedRelation {
        &self.relations[kind.slot()]
    }

    /// Mutably borrows one relation.
    pub(crate) fn relation_mut(&mut self, kind: RelationKind) -> &mut WeightedRelation {
        &mut self.relations[kind.slot()]
    }

    /// Iterates the three relations in store order.
    pub fn relations(&self) -> impl Iterator<Item = &WeightedRelation> {
        self.relations.iter()
    }

    /// Iterates every tuple across all relations, tagged with its kind.
    pub fn iter_tuples(&self) -> impl Iterator<Item = (RelationKind, &WeightedTuple)> {
        self.relations
            .iter()
            .flat_map(|r| r.tuples().iter().map(move |t| (r.kind(), t)))
    }

    /// Total tuple count across all relations.
    pub fn total_tuples(&self) -> usize {
        self.relations.iter().map(|r| r.len()).sum()
    }

    /// Rebuilds every relation's key index after deserialization.
    pub(crate) fn rebuild_indexes(&mut self) {
        for rel in &mut self.relations {
            rel.rebuild_index();
        }
    }
}
