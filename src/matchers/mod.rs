//! The three token matchers.
//!
//! Each matcher is a stateless function over the immutable [`crate::Index`]:
//! course-number tokens match object ids (with alias-prefix rewriting), GE
//! tokens match `geList` membership, and free-text keywords match the keyword
//! table with exact-match and department-expansion boosting. Absence of
//! matches is an empty collection, never an error.

mod course;
mod ge;
mod keyword;

pub use course::match_course;
pub use ge::match_ge;
pub use keyword::match_keyword;
