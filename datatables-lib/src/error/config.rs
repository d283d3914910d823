//! Table definition and request state error types

/// Errors raised while defining a table or building a request state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share a name.
    #[error("Column '{0}' is already defined")]
    DuplicateColumn(String),

    /// A column was referenced that the table does not define.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Ordering was requested on a column that does not allow it.
    #[error("Column '{0}' is not orderable")]
    NotOrderable(String),

    /// Searching was requested on a column that does not allow it.
    #[error("Column '{0}' is not searchable")]
    NotSearchable(String),

    /// A column name was empty.
    #[error("Column name must not be empty")]
    EmptyColumnName,
}
