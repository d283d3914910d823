//! Typed record getter errors

use super::TransformError;

/// Error returned by the typed getters on [`Record`](crate::model::Record).
///
/// Converts into [`TransformError`] so column transforms can use `?` on
/// typed getters directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The record has no such field.
    #[error("Record has no field '{field}'")]
    Missing { field: String },

    /// The field holds a value of another type.
    #[error("Field '{field}' holds {actual}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Returns the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::TypeMismatch { field, .. } => field,
        }
    }
}

impl From<FieldError> for TransformError {
    fn from(err: FieldError) -> Self {
        TransformError::msg(err.to_string())
    }
}
