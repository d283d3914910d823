//! Error types

mod access;
mod adapter;
mod config;
mod field;
mod transform;

pub use access::*;
pub use adapter::*;
pub use config::*;
pub use field::*;
pub use transform::*;

/// Top-level error returned by table queries.
///
/// Every failure that escapes [`run_query`](crate::adapter::run_query) is one
/// of these. Accessor misses never are: they become `Null` cells.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend failed while preparing or iterating the query.
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// A column or row transformer failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl Error {
    /// Returns `true` if the error originated in the backend.
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Adapter(_))
    }

    /// Returns the name of the failing column, if a column transform failed.
    pub fn column(&self) -> Option<&str> {
        match self {
            Error::Transform(e) => e.column_name(),
            _ => None,
        }
    }
}
