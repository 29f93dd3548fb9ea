//! The bundled sample population.

use super::BaseDb;
use crate::db::PubId;
use crate::engine::store::AuthorId;

/// Builds the sample academic database used by the demo pipeline and tests.
///
/// Four authors, six publications, two students, four advisor pairs, and two
/// institutions, arranged so every view derivation produces at least one row.
pub fn sample_db() -> BaseDb {
    let mut db = BaseDb::new();

    db.add_author(AuthorId(1), "Alice");
    db.add_author(AuthorId(2), "Bob");
    db.add_author(AuthorId(3), "Charlie");
    db.add_author(AuthorId(4), "David");

    db.add_publication(PubId(101), 2006);
    db.add_publication(PubId(102), 2006);
    db.add_publication(PubId(103), 2007);
    db.add_publication(PubId(104), 2008);
    db.add_publication(PubId(105), 2022);
    db.add_publication(PubId(106), 2006);

    db.add_wrote(AuthorId(1), PubId(101));
    db.add_wrote(AuthorId(2), PubId(101));
    db.add_wrote(AuthorId(1), PubId(102));
    db.add_wrote(AuthorId(2), PubId(102));
    db.add_wrote(AuthorId(3), PubId(103));
    db.add_wrote(AuthorId(4), PubId(103));
    db.add_wrote(AuthorId(3), PubId(104));
    db.add_wrote(AuthorId(4), PubId(104));
    db.add_wrote(AuthorId(1), PubId(105));
    db.add_wrote(AuthorId(3), PubId(105));
    db.add_wrote(AuthorId(1), PubId(106));
    db.add_wrote(AuthorId(2), PubId(106));

    db.add_student(AuthorId(1), 2005, 0.8);
    db.add_student(AuthorId(2), 2006, 0.7);

    db.add_advisor(AuthorId(1), AuthorId(2), 0.9);
    db.add_advisor(AuthorId(1), AuthorId(3), 0.8);
    db.add_advisor(AuthorId(2), AuthorId(4), 0.7);
    db.add_advisor(AuthorId(3), AuthorId(4), 0.75);

    db.add_affiliation(AuthorId(1), "University A");
    db.add_affiliation(AuthorId(2), "University A");
    db.add_affiliation(AuthorId(3), "University B");
    db.add_affiliation(AuthorId(4), "University B");

    db
}
