//! The search engine: classification dispatch, token combination, and result
//! assembly.
//!
//! [`SearchEngine`] holds the immutable index snapshot as explicit instance
//! state. "Not ready" is observable (`is_ready`) rather than ambient: a
//! search against an uninitialized engine fails with
//! [`SearchError::NotInitialized`] deterministically, never blocking and
//! never silently returning empty. After `init` the engine is read-only;
//! concurrent readers need no locking because no writer exists.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::combine::{inherit_departments, intersect, union, OrderedSet};
use crate::error::{IndexError, SearchError};
use crate::index::load_index;
use crate::matchers::{match_course, match_ge, match_keyword};
use crate::query::{classify, classify_non_ge, normalize, Classified, CourseToken};
use crate::ranking::compare_ids;
use crate::types::{EntityType, Index, SearchHit};

/// Per-call search options. The defaults mean "no limit, no filters".
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of results; `None` is the unbounded sentinel.
    pub num_results: Option<usize>,
    /// When set, only entities of these types are returned.
    pub result_types: Option<Vec<EntityType>>,
    /// Metadata filters: for each key with a non-empty value list, an
    /// entity's metadata must contain every required value.
    pub filter_options: BTreeMap<String, Vec<String>>,
}

impl SearchOptions {
    pub fn with_num_results(mut self, n: usize) -> Self {
        self.num_results = Some(n);
        self
    }

    pub fn with_result_types(mut self, types: Vec<EntityType>) -> Self {
        self.result_types = Some(types);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.filter_options.insert(key.into(), values);
        self
    }
}

/// The embedded query engine. Construct empty and [`init`](Self::init) once,
/// or construct directly from a loaded index.
#[derive(Debug, Default)]
pub struct SearchEngine {
    index: Option<Index>,
}

impl SearchEngine {
    /// An engine with no index; every search fails with `NotInitialized`
    /// until [`init`](Self::init) is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that is ready immediately.
    pub fn with_index(index: Index) -> Self {
        Self { index: Some(index) }
    }

    /// Install the index snapshot. The engine holds no other durable state.
    pub fn init(&mut self, index: Index) {
        self.index = Some(index);
    }

    /// Load, validate, and install a serialized index artifact.
    pub fn init_from_path(&mut self, path: &Path) -> Result<(), IndexError> {
        self.index = Some(load_index(path)?);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// The loaded index, if any. Read-only.
    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    /// Execute a search: classify, match, combine, filter, rank, truncate.
    ///
    /// Returns ranked hits in a deterministic total order. Fails with
    /// `NotInitialized` before an index is loaded and `InvalidQuery` for an
    /// empty query or a keyword token shorter than two characters; absence
    /// of matches is an empty vector, never an error.
    pub fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let index = self.index.as_ref().ok_or(SearchError::NotInitialized)?;

        let normalized = normalize(query);
        if normalized.chars().count() < 2 {
            return Err(SearchError::invalid(
                "query must be at least two characters long",
            ));
        }

        let limit = options.num_results.unwrap_or(usize::MAX);
        let candidates = resolve(index, classify(&normalized), &normalized, limit)?;
        debug!(
            query = normalized.as_str(),
            candidates = candidates.len(),
            "query resolved"
        );

        Ok(assemble(index, candidates, options))
    }
}

/// Dispatch a classified query to its matchers and combine per-token output.
fn resolve(
    index: &Index,
    classified: Classified,
    query: &str,
    limit: usize,
) -> Result<OrderedSet, SearchError> {
    match classified {
        Classified::Ge(tokens) if tokens.len() == 1 => {
            let ids = match_ge(index, &tokens[0]);
            if ids.len() > 1 {
                debug!(category = %tokens[0].canonical_id(), "classified as GE");
                Ok(ids.into_iter().collect())
            } else {
                // The category matched nothing: not a GE query after all.
                debug!(
                    category = %tokens[0].canonical_id(),
                    "unpopulated GE category, falling through"
                );
                resolve(index, classify_non_ge(query), query, limit)
            }
        }
        Classified::Ge(tokens) => {
            // A comma-separated GE list is assumed well-formed; no
            // single-element validity check per token.
            debug!(tokens = tokens.len(), "classified as GE list");
            Ok(union(tokens.iter().map(|token| {
                match_ge(index, token).into_iter().collect::<OrderedSet>()
            })))
        }
        Classified::Course(tokens) => {
            debug!(tokens = tokens.len(), "classified as course numbers");
            Ok(course_union(index, tokens))
        }
        Classified::Keywords(tokens) => {
            debug!(tokens = tokens.len(), "classified as keywords");
            keyword_intersection(index, &tokens, limit)
        }
    }
}

/// Union of course-token matches, with department-fragment inheritance
/// applied across the comma-separated list first.
fn course_union(index: &Index, tokens: Vec<CourseToken>) -> OrderedSet {
    let tokens = inherit_departments(tokens);
    union(tokens.iter().map(|token| match_course(index, token)))
}

/// Conjunctive keyword semantics: every keyword must match. The first
/// token's relative order is preserved through the intersection.
fn keyword_intersection(
    index: &Index,
    tokens: &[String],
    limit: usize,
) -> Result<OrderedSet, SearchError> {
    if tokens.is_empty() {
        return Err(SearchError::invalid("query contains no searchable tokens"));
    }
    for token in tokens {
        if token.chars().count() < 2 {
            return Err(SearchError::invalid(format!(
                "keyword '{token}' must be at least two characters long"
            )));
        }
    }
    let per_token: Vec<OrderedSet> = tokens
        .iter()
        .map(|token| match_keyword(index, token, limit))
        .collect();
    Ok(intersect(per_token))
}

/// The result assembler: apply filters, rank, truncate, materialize.
fn assemble(index: &Index, candidates: OrderedSet, options: &SearchOptions) -> Vec<SearchHit> {
    let mut ids: Vec<String> = candidates.into_vec();

    // Ids without a record cannot be ranked or materialized. (A multi-token
    // GE query may name a category absent from the catalog.)
    ids.retain(|id| index.object(id).is_some());

    if let Some(types) = &options.result_types {
        ids.retain(|id| {
            index
                .object(id)
                .is_some_and(|e| types.contains(&e.entity_type))
        });
    }

    for (key, required) in &options.filter_options {
        if required.is_empty() {
            continue;
        }
        ids.retain(|id| {
            index.object(id).is_some_and(|entity| {
                entity
                    .metadata
                    .get(key)
                    .is_some_and(|value| required.iter().all(|r| value.contains(r)))
            })
        });
    }

    ids.sort_by(|a, b| compare_ids(index, a, b));
    if let Some(limit) = options.num_results {
        ids.truncate(limit);
    }

    ids.into_iter()
        .filter_map(|id| {
            index.object(&id).cloned().map(|entity| SearchHit { id, entity })
        })
        .collect()
}
