//! Error types for spancov.

use thiserror::Error;

/// Result type for spancov operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for spancov operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A span was constructed with `start > end`.
    ///
    /// This is a programming error in the caller, not a data condition:
    /// spans are never silently reordered or clamped.
    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan {
        /// Offered start offset.
        start: usize,
        /// Offered end offset.
        end: usize,
    },

    /// A query's reference spans sum to zero length, so recall and IoU
    /// have no denominator.
    #[error("query {query}: reference spans sum to zero length")]
    EmptyReferences {
        /// Id of the offending query.
        query: String,
    },

    /// A query's retrieved spans sum to zero length, so precision and IoU
    /// have no denominator.
    #[error("query {query}: retrieved spans sum to zero length")]
    EmptyRetrieval {
        /// Id of the offending query.
        query: String,
    },

    /// Report serialization failed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid span error.
    pub fn invalid_span(start: usize, end: usize) -> Self {
        Error::InvalidSpan { start, end }
    }

    /// Create an empty references error for a query.
    pub fn empty_references(query: impl Into<String>) -> Self {
        Error::EmptyReferences {
            query: query.into(),
        }
    }

    /// Create an empty retrieval error for a query.
    pub fn empty_retrieval(query: impl Into<String>) -> Self {
        Error::EmptyRetrieval {
            query: query.into(),
        }
    }

    /// True for per-query data conditions the caller may skip over,
    /// false for errors that should abort the batch.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::EmptyReferences { .. } | Error::EmptyRetrieval { .. }
        )
    }
}
