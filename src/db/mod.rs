//! Base probabilistic database tables.
//!
//! The raw data the views derive from: authors, publications, authorship,
//! and the probabilistic student, advisor, and affiliation tables. Everything
//! is held in memory by a [`BaseDb`] value with id-based lookup indexes;
//! a full reset is "drop the value and rebuild", there are no partial
//! deletes.

mod sample;

pub use sample::sample_db;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::engine::store::AuthorId;

/// A unique identifier for a publication.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PubId(pub u32);

/// An author row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub aid: AuthorId,
    pub name: String,
}

/// An authorship row linking an author to a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrote {
    pub aid: AuthorId,
    pub pid: PubId,
}

/// A probabilistic student row: the author was a student in `year` with the
/// given probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentP {
    pub aid: AuthorId,
    pub year: i32,
    pub probability: f64,
}

/// A probabilistic advisor row: `aid1` advised `aid2` with the given
/// probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorP {
    pub aid1: AuthorId,
    pub aid2: AuthorId,
    pub probability: f64,
}

/// An affiliation row linking an author to an institution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliation {
    pub aid: AuthorId,
    pub inst: String,
}

/// A publication row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Publication {
    pub pid: PubId,
    pub year: i32,
}

/// The in-memory base database.
///
/// Rows are kept in insertion order; the indexes exist for the joins the
/// view derivations perform (publications per author, year per publication,
/// student and affiliation lookup by author).
#[derive(Debug, Clone, Default)]
pub struct BaseDb {
    authors: Vec<Author>,
    wrote: Vec<Wrote>,
    students: Vec<StudentP>,
    advisors: Vec<AdvisorP>,
    affiliations: Vec<Affiliation>,
    publications: Vec<Publication>,

    pubs_by_author: FxHashMap<AuthorId, FxHashSet<PubId>>,
    year_by_pub: FxHashMap<PubId, i32>,
    student_by_author: FxHashMap<AuthorId, usize>,
    inst_by_author: FxHashMap<AuthorId, String>,
}

impl BaseDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an author.
    pub fn add_author(&mut self, aid: AuthorId, name: impl Into<String>) {
        self.authors.push(Author {
            aid,
            name: name.into(),
        });
    }

    /// Adds a publication.
    pub fn add_publication(&mut self, pid: PubId, year: i32) {
        self.year_by_pub.insert(pid, year);
        self.publications.push(Publication { pid, year });
    }

    /// Records that an author wrote a publication.
    pub fn add_wrote(&mut self, aid: AuthorId, pid: PubId) {
        self.pubs_by_author.entry(aid).or_default().insert(pid);
        self.wrote.push(Wrote { aid, pid });
    }

    /// Adds a probabilistic student row.
    pub fn add_student(&mut self, aid: AuthorId, year: i32, probability: f64) {
        self.student_by_author.insert(aid, self.students.len());
        self.students.push(StudentP {
            aid,
            year,
            probability,
        });
    }

    /// Adds a probabilistic advisor row.
    pub fn add_advisor(&mut self, aid1: AuthorId, aid2: AuthorId, probability: f64) {
        self.advisors.push(AdvisorP {
            aid1,
            aid2,
            probability,
        });
    }

    /// Adds an affiliation row.
    pub fn add_affiliation(&mut self, aid: AuthorId, inst: impl Into<String>) {
        let inst = inst.into();
        self.inst_by_author.insert(aid, inst.clone());
        self.affiliations.push(Affiliation { aid, inst });
    }

    /// All author rows.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// All authorship rows.
    pub fn wrote(&self) -> &[Wrote] {
        &self.wrote
    }

    /// All student rows.
    pub fn students(&self) -> &[StudentP] {
        &self.students
    }

    /// All advisor rows.
    pub fn advisors(&self) -> &[AdvisorP] {
        &self.advisors
    }

    /// All affiliation rows.
    pub fn affiliations(&self) -> &[Affiliation] {
        &self.affiliations
    }

    /// All publication rows.
    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    /// The student row for an author, if any.
    pub fn student(&self, aid: AuthorId) -> Option<&StudentP> {
        self.student_by_author.get(&aid).map(|&i| &self.students[i])
    }

    /// The set of publications an author wrote, if any.
    pub fn publications_of(&self, aid: AuthorId) -> Option<&FxHashSet<PubId>> {
        self.pubs_by_author.get(&aid)
    }

    /// The year a publication appeared, if known.
    pub fn publication_year(&self, pid: PubId) -> Option<i32> {
        self.year_by_pub.get(&pid).copied()
    }

    /// The institution an author is affiliated with, if any.
    pub fn institution(&self, aid: AuthorId) -> Option<&str> {
        self.inst_by_author.get(&aid).map(String::as_str)
    }

    /// The display name of an author, if known.
    pub fn author_name(&self, aid: AuthorId) -> Option<&str> {
        self.authors
            .iter()
            .find(|a| a.aid == aid)
            .map(|a| a.name.as_str())
    }
}
