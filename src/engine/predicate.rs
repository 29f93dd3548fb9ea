//! Typed selection predicates over the store.
//!
//! Queries select tuples by their key attributes. Rather than splicing raw
//! predicate strings into generated SQL, the predicate is a small structured
//! expression evaluated in-process against each tuple, which removes the
//! injection surface and keeps evaluation free of side effects.
//!
//! A predicate is a boolean combination of attribute tests. Tests that name
//! an attribute a key shape does not have (a third author id on a pair key,
//! an institution on a triple key) simply do not match.

use crate::engine::store::{AuthorId, RelationKind, TupleKey};

/// A single test against one tuple attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyTest {
    /// First author id equals the given id.
    Aid1(AuthorId),
    /// Second author id equals the given id.
    Aid2(AuthorId),
    /// Third author id equals the given id (triple keys only).
    Aid3(AuthorId),
    /// Institution label equals the given string (labeled keys only).
    Inst(String),
    /// The tuple lives in the given relation.
    Relation(RelationKind),
    /// Exact key equality.
    Key(TupleKey),
}

impl KeyTest {
    fn matches(&self, kind: RelationKind, key: &TupleKey) -> bool {
        match self {
            KeyTest::Aid1(a) => key.aid1() == *a,
            KeyTest::Aid2(a) => key.aid2() == *a,
            KeyTest::Aid3(a) => key.aid3() == Some(*a),
            KeyTest::Inst(inst) => key.inst() == Some(inst.as_str()),
            KeyTest::Relation(k) => kind == *k,
            KeyTest::Key(k) => key == k,
        }
    }
}

/// A boolean selection predicate over `(relation, key)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    /// Matches every tuple.
    True,
    /// A single attribute test.
    Test(KeyTest),
    /// Both operands must match.
    And(Box<Predicate>, Box<Predicate>),
    /// Either operand must match.
    Or(Box<Predicate>, Box<Predicate>),
    /// The operand must not match.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Evaluates the predicate against one tuple. Pure, no side effects.
    pub fn matches(&self, kind: RelationKind, key: &TupleKey) -> bool {
        match self {
            Predicate::True => true,
            Predicate::Test(test) => test.matches(kind, key),
            Predicate::And(l, r) => l.matches(kind, key) && r.matches(kind, key),
            Predicate::Or(l, r) => l.matches(kind, key) || r.matches(kind, key),
            Predicate::Not(p) => !p.matches(kind, key),
        }
    }

    /// Conjunction builder.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Disjunction builder.
    pub fn or(self, other: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Negation builder.
    pub fn negate(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }

    /// Selects tuples whose first two author ids equal the given pair.
    ///
    /// The typed equivalent of the classic `aid1 = .. AND aid2 = ..` filter.
    pub fn author_pair(aid1: AuthorId, aid2: AuthorId) -> Predicate {
        Predicate::Test(KeyTest::Aid1(aid1)).and(Predicate::Test(KeyTest::Aid2(aid2)))
    }
}
