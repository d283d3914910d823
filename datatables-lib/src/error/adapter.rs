//! Backend query error types

use super::PathError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by an adapter while preparing or iterating a query.
///
/// None of these are recovered by the query template. They abort the whole
/// call and no partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The backend reported a failure.
    #[error("Query failed: {message}")]
    Query {
        /// Description of the failure.
        message: String,
        /// Underlying backend error, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// A mapped property path could not be parsed.
    #[error("Invalid property mapping for column '{column}': {source}")]
    InvalidMapping {
        /// Column whose mapping was rejected.
        column: String,
        /// Parse failure.
        #[source]
        source: PathError,
    },

    /// The backend never populated the row counts.
    #[error("Adapter did not set {0} before results were consumed")]
    CountsNotSet(&'static str),

    /// The backend reported more filtered rows than total rows.
    #[error("Filtered row count {filtered} exceeds total row count {total}")]
    InconsistentCounts {
        /// Rows matching the filters.
        filtered: usize,
        /// Rows ignoring all filters.
        total: usize,
    },
}

impl AdapterError {
    /// Creates a new query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new query error wrapping an underlying backend error.
    pub fn query_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Query {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
