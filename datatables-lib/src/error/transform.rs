//! Column transform error types

/// Error raised by a column transform or a row transformer.
///
/// Transform failures are never suppressed: a broken formatter aborts the
/// whole query instead of producing a partially formatted page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// A column's transform failed.
    #[error("Transform of column '{column}' failed: {message}")]
    Column {
        /// Name of the failing column.
        column: String,
        /// Description of the failure.
        message: String,
    },

    /// The table's row transformer failed.
    #[error("Row transformer failed: {message}")]
    Row {
        /// Description of the failure.
        message: String,
    },
}

impl TransformError {
    /// Creates a new column transform error.
    pub fn column(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Column {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new row transformer error.
    pub fn row(message: impl Into<String>) -> Self {
        Self::Row {
            message: message.into(),
        }
    }

    /// Creates an error with only a message.
    ///
    /// Transform closures use this; the column name is attached by
    /// [`Column::transform`](crate::table::Column::transform).
    pub fn msg(message: impl Into<String>) -> Self {
        Self::column("", message)
    }

    /// Returns the column name, if this is a column error with a known column.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column { column, .. } if !column.is_empty() => Some(column),
            _ => None,
        }
    }

    /// Returns the failure description.
    pub fn message(&self) -> &str {
        match self {
            Self::Column { message, .. } | Self::Row { message } => message,
        }
    }

    pub(crate) fn for_row(self) -> Self {
        match self {
            Self::Column { column, message } if column.is_empty() => Self::row(message),
            other => other,
        }
    }

    pub(crate) fn for_column(self, name: &str) -> Self {
        match self {
            Self::Column { message, .. } => Self::column(name, message),
            Self::Row { message } => Self::column(name, message),
        }
    }
}
