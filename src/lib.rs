//! Embedded fuzzy search over a static academic catalog.
//!
//! This crate answers fuzzy lookups ("cs161", "ge1a", "compiler design",
//! "peltzer") against a small, immutable catalog of academic entities — GE
//! categories, departments, courses, and instructors — and returns a ranked,
//! bounded, optionally filtered result set. It is an in-process query
//! engine, not a network service.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌───────────────────────────┐
//! │  query.rs  │───▶│  matchers/   │───▶│        engine.rs          │
//! │ (classify, │    │ (course, ge, │    │ (combine, filter, rank,   │
//! │  tokens)   │    │  keyword)    │    │  truncate, materialize)   │
//! └────────────┘    └──────────────┘    └───────────────────────────┘
//!        │                 │                        │
//!        ▼                 ▼                        ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      types.rs / index.rs                        │
//! │   (Entity, Index: objects + keywords + aliases, loading)        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index is built offline by [`build`] from raw course/instructor
//! caches, serialized as JSON, and loaded once per process. A query is
//! classified into exactly one of three shapes — GE category, course number,
//! or free-text keywords — matched by the corresponding matcher(s), combined
//! (union across comma-separated alternatives, intersection across keyword
//! tokens), and assembled into a deterministic ranked order.
//!
//! # Usage
//!
//! ```ignore
//! use zotsearch::{SearchEngine, SearchOptions};
//!
//! let mut engine = SearchEngine::new();
//! engine.init_from_path("index.json".as_ref())?;
//!
//! let hits = engine.search("cs 161", &SearchOptions::default().with_num_results(10))?;
//! for hit in hits {
//!     println!("{}: {}", hit.id, hit.entity.name);
//! }
//! ```

pub mod build;
pub mod combine;
pub mod engine;
pub mod error;
pub mod index;
pub mod matchers;
pub mod query;
pub mod ranking;
pub mod types;

// Re-exports for the public API
pub use combine::OrderedSet;
pub use engine::{SearchEngine, SearchOptions};
pub use error::{BuildError, IndexError, SearchError};
pub use index::{load_index, load_index_from_reader};
pub use matchers::{match_course, match_ge, match_keyword};
pub use query::{classify, normalize, Classified, CourseToken, GeToken};
pub use ranking::{compare_ids, CourseNumber};
pub use types::{Entity, EntityType, Index, Metadata, MetadataValue, SearchHit};
