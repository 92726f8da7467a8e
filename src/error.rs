//! Error types, one enum per concern.
//!
//! A search call has exactly two failure modes: the engine was never given an
//! index, or the query itself is malformed. Absence of matches is an empty
//! result, never an error. Loading and building have their own enums so
//! callers can tell a broken artifact from a broken query.

use thiserror::Error;

/// Failures of the search entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Search was invoked before an index was loaded. Recoverable: load and
    /// retry.
    #[error("index has not been initialized; load an index before searching")]
    NotInitialized,

    /// The query is structurally malformed (empty, or a keyword token shorter
    /// than two characters).
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },
}

impl SearchError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SearchError::InvalidQuery {
            reason: reason.into(),
        }
    }
}

/// Failures while loading or validating a serialized index artifact.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read index artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse index artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// An id referenced by a keyword list or alias entry has no record in
    /// `objects`.
    #[error("index references unknown object '{id}' (via {referenced_by})")]
    MissingObject { id: String, referenced_by: String },
}

/// Failures of the offline index builder.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse cache file '{file}': {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch '{url}': {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
