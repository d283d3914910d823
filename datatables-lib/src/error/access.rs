//! Property path and accessor error types

/// A field path that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid property path '{path}' at position {position}: {reason}")]
pub struct PathError {
    /// The offending path.
    pub path: String,
    /// Byte offset where parsing failed.
    pub position: usize,
    /// What was expected.
    pub reason: &'static str,
}

impl PathError {
    /// Creates a new path error.
    pub fn new(path: impl Into<String>, position: usize, reason: &'static str) -> Self {
        Self {
            path: path.into(),
            position,
            reason,
        }
    }
}

/// Errors from reading a value through a property path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The path does not resolve against the record.
    #[error("Path '{path}' is not readable")]
    NotReadable { path: String },

    /// The path string could not be parsed.
    #[error(transparent)]
    InvalidPath(#[from] PathError),
}

impl AccessError {
    /// Creates a new not-readable error.
    pub fn not_readable(path: impl Into<String>) -> Self {
        Self::NotReadable { path: path.into() }
    }
}
