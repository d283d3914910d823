//! Column definitions

use std::fmt;
use std::sync::Arc;

use crate::error::TransformError;
use crate::model::Value;

/// Cell formatter: receives the mapped value (or `Null`) and the raw record.
pub type TransformFn<R> = dyn Fn(Value, &R) -> Result<Value, TransformError> + Send + Sync;

/// A table column.
///
/// A column maps one field path of the record to one cell of the row. A
/// column without a field is computed: its transform always receives `Null`
/// and derives the cell from the record itself.
///
/// # Example
///
/// ```
/// use datatables_lib::model::Record;
/// use datatables_lib::model::Value;
/// use datatables_lib::table::Column;
///
/// let name = Column::<Record>::new("name").field("profile.name");
///
/// let full = Column::<Record>::new("full").with_transform(|_, record| {
///     let first = record.get_string("first")?.unwrap_or_default();
///     let last = record.get_string("last")?.unwrap_or_default();
///     Ok(Value::from(format!("{first} {last}")))
/// });
/// ```
pub struct Column<R> {
    name: String,
    field: Option<String>,
    label: Option<String>,
    orderable: bool,
    searchable: bool,
    visible: bool,
    class_name: Option<String>,
    default_value: Option<Value>,
    transform: Option<Arc<TransformFn<R>>>,
}

impl<R> Column<R> {
    /// Creates a column with no field and the identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            label: None,
            orderable: true,
            searchable: true,
            visible: true,
            class_name: None,
            default_value: None,
            transform: None,
        }
    }

    /// Creates a column whose field path equals its name.
    pub fn mapped(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone()).field(name)
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Sets the field path. An empty path means no field.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.field = (!field.is_empty()).then_some(field);
        self
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets whether the column may be sorted on.
    pub fn orderable(mut self, orderable: bool) -> Self {
        self.orderable = orderable;
        self
    }

    /// Sets whether the column takes part in searching.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Sets whether the column is shown by the client.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the CSS class name for the client.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the value substituted for `Null` before the transform runs.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the cell transform.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value, &R) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field path, if the column maps one.
    pub fn get_field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the label, falling back to the name.
    pub fn get_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Returns `true` if the column may be sorted on.
    pub fn is_orderable(&self) -> bool {
        self.orderable
    }

    /// Returns `true` if the column takes part in searching.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Returns `true` if the column is shown by the client.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the CSS class name, if set.
    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Turns a mapped value into a cell value.
    ///
    /// `value` is `Null` for unmapped columns and unreadable paths. Errors are
    /// attributed to this column.
    pub fn transform(&self, value: Value, record: &R) -> Result<Value, TransformError> {
        let value = match (&self.default_value, value) {
            (Some(default), Value::Null) => default.clone(),
            (_, value) => value,
        };
        match &self.transform {
            Some(transform) => transform(value, record).map_err(|e| e.for_column(&self.name)),
            None => Ok(value),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            field: self.field.clone(),
            label: self.label.clone(),
            orderable: self.orderable,
            searchable: self.searchable,
            visible: self.visible,
            class_name: self.class_name.clone(),
            default_value: self.default_value.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("orderable", &self.orderable)
            .field("searchable", &self.searchable)
            .field("has_transform", &self.transform.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_empty_field_means_unmapped() {
        let column = Column::<Record>::new("x").field("");
        assert_eq!(column.get_field(), None);
        assert_eq!(Column::<Record>::mapped("id").get_field(), Some("id"));
    }

    #[test]
    fn test_identity_transform() {
        let column = Column::<Record>::new("x");
        let out = column.transform(Value::from(3i32), &Record::new()).unwrap();
        assert_eq!(out, Value::Int(3));
    }

    #[test]
    fn test_default_value_replaces_null_only() {
        let column = Column::<Record>::new("x").default_value("n/a");
        let record = Record::new();
        assert_eq!(
            column.transform(Value::Null, &record).unwrap(),
            Value::from("n/a")
        );
        assert_eq!(
            column.transform(Value::from("y"), &record).unwrap(),
            Value::from("y")
        );
    }

    #[test]
    fn test_error_is_attributed_to_column() {
        let column = Column::<Record>::new("price")
            .with_transform(|_, _| Err(TransformError::msg("bad number")));
        let err = column.transform(Value::Null, &Record::new()).unwrap_err();
        assert_eq!(err, TransformError::column("price", "bad number"));
    }

    #[test]
    fn test_typed_getter_errors_propagate() {
        let column = Column::<Record>::new("n")
            .with_transform(|_, record| Ok(Value::from(record.get_string("missing")?)));
        let err = column.transform(Value::Null, &Record::new()).unwrap_err();
        assert_eq!(err.column_name(), Some("n"));
    }
}
