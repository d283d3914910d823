//! Table definitions and request state.
//!
//! - [`DataTable`] - ordered columns, an optional row transformer and options
//! - [`Column`] - field mapping and cell transform for one column
//! - [`DataTableState`] - paging, search and sort for one request

mod column;
mod config;
mod order;
mod state;

pub use column::*;
pub use config::*;
pub use order::*;
pub use state::*;

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::error::TransformError;
use crate::result::Row;

/// Whole-row transformer: receives the assembled row and the raw record and
/// returns the final row.
pub type RowTransformFn<R> = dyn Fn(Row, &R) -> Result<Row, TransformError> + Send + Sync;

/// A table definition over records of type `R`.
///
/// # Example
///
/// ```
/// use datatables_lib::model::Record;
/// use datatables_lib::table::{Column, DataTable};
///
/// let mut table = DataTable::<Record>::new("users");
/// table
///     .add(Column::mapped("id"))?
///     .add(Column::new("name").field("profile.name"))?;
/// assert_eq!(table.columns().len(), 2);
/// # Ok::<(), datatables_lib::error::ConfigError>(())
/// ```
pub struct DataTable<R> {
    name: String,
    columns: Vec<Column<R>>,
    transformer: Option<Arc<RowTransformFn<R>>>,
    options: TableOptions,
}

impl<R> DataTable<R> {
    /// Creates an empty table with default options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            transformer: None,
            options: TableOptions::default(),
        }
    }

    /// Replaces the table options.
    pub fn with_options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the whole-row transformer.
    pub fn with_transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(Row, &R) -> Result<Row, TransformError> + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Appends a column. Names must be unique and non-empty.
    pub fn add(&mut self, column: Column<R>) -> Result<&mut Self, ConfigError> {
        if column.name().is_empty() {
            return Err(ConfigError::EmptyColumnName);
        }
        if self.column_index(column.name()).is_some() {
            return Err(ConfigError::DuplicateColumn(column.name().to_string()));
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the columns in declared order.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Returns a column by position.
    pub fn column_at(&self, index: usize) -> Option<&Column<R>> {
        self.columns.get(index)
    }

    /// Returns the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Returns the row transformer, if set.
    pub fn transformer(&self) -> Option<&RowTransformFn<R>> {
        self.transformer.as_deref()
    }

    /// Returns the table options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("has_transformer", &self.transformer.is_some())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = DataTable::<Record>::new("t");
        table.add(Column::mapped("id")).unwrap();
        assert_eq!(
            table.add(Column::new("id")).unwrap_err(),
            ConfigError::DuplicateColumn("id".into())
        );
        assert_eq!(
            table.add(Column::new("")).unwrap_err(),
            ConfigError::EmptyColumnName
        );
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_lookup() {
        let mut table = DataTable::<Record>::new("t");
        table
            .add(Column::mapped("a"))
            .unwrap()
            .add(Column::mapped("b"))
            .unwrap();
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column("a").map(Column::name), Some("a"));
        assert!(table.column_at(2).is_none());
        assert!(table.transformer().is_none());
    }
}
