//! Per-invocation query context

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::table::DataTableState;

/// Mutable context for one adapter invocation.
///
/// Created by [`run_query`](super::run_query) from the request state and
/// handed to each backend hook in turn. Backends record the row counts and
/// the identifier path here, and may stash their own query objects in the
/// scratch map between `prepare_query` and `get_results`.
pub struct AdapterQuery<'s, R> {
    state: &'s DataTableState<'s, R>,
    identifier_property_path: Option<String>,
    total_rows: Option<usize>,
    filtered_rows: Option<usize>,
    data: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl<'s, R> AdapterQuery<'s, R> {
    /// Creates an empty context for `state`.
    pub fn new(state: &'s DataTableState<'s, R>) -> Self {
        Self {
            state,
            identifier_property_path: None,
            total_rows: None,
            filtered_rows: None,
            data: HashMap::new(),
        }
    }

    /// Returns the request state.
    pub fn state(&self) -> &'s DataTableState<'s, R> {
        self.state
    }

    // =========================================================================
    // Backend outputs
    // =========================================================================

    /// Returns the path used to derive row identifiers, if set.
    pub fn identifier_property_path(&self) -> Option<&str> {
        self.identifier_property_path.as_deref()
    }

    /// Sets the path used to derive row identifiers. An empty path means none.
    pub fn set_identifier_property_path(&mut self, path: impl Into<String>) {
        self.identifier_property_path = Some(path.into());
    }

    /// Returns the record count ignoring filters, if set.
    pub fn total_rows(&self) -> Option<usize> {
        self.total_rows
    }

    /// Sets the record count ignoring filters.
    pub fn set_total_rows(&mut self, rows: usize) {
        self.total_rows = Some(rows);
    }

    /// Returns the record count after filters, if set.
    pub fn filtered_rows(&self) -> Option<usize> {
        self.filtered_rows
    }

    /// Sets the record count after filters, before paging.
    pub fn set_filtered_rows(&mut self, rows: usize) {
        self.filtered_rows = Some(rows);
    }

    // =========================================================================
    // Backend scratch data
    // =========================================================================

    /// Stores a backend value under `key`, replacing any previous value.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Box::new(value));
    }

    /// Returns the value under `key` if it has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.data.get(key)?.downcast_ref()
    }

    /// Returns a mutable reference to the value under `key` if it has type `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.data.get_mut(key)?.downcast_mut()
    }

    /// Removes and returns the value under `key` if it has type `T`.
    ///
    /// A value of another type is left in place.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.data.get(key)?.is::<T>() {
            return None;
        }
        let boxed = self.data.remove(key)?;
        boxed.downcast::<T>().ok().map(|b| *b)
    }
}

impl<R> fmt::Debug for AdapterQuery<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterQuery")
            .field("table", &self.state.table().name())
            .field("identifier_property_path", &self.identifier_property_path)
            .field("total_rows", &self.total_rows)
            .field("filtered_rows", &self.filtered_rows)
            .field("data_keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::DataTable;

    #[test]
    fn test_counts_start_unset() {
        let table = DataTable::<Record>::new("t");
        let state = DataTableState::new(&table);
        let mut query = AdapterQuery::new(&state);

        assert_eq!(query.total_rows(), None);
        assert_eq!(query.filtered_rows(), None);
        query.set_total_rows(5);
        query.set_filtered_rows(2);
        assert_eq!(query.total_rows(), Some(5));
        assert_eq!(query.filtered_rows(), Some(2));
    }

    #[test]
    fn test_scratch_data_is_typed() {
        let table = DataTable::<Record>::new("t");
        let state = DataTableState::new(&table);
        let mut query = AdapterQuery::new(&state);

        query.set("page", vec![1usize, 2]);
        assert_eq!(query.get::<Vec<usize>>("page"), Some(&vec![1, 2]));
        assert_eq!(query.get::<String>("page"), None);
        assert_eq!(query.take::<String>("page"), None);

        query.get_mut::<Vec<usize>>("page").unwrap().push(3);
        assert_eq!(query.take::<Vec<usize>>("page"), Some(vec![1, 2, 3]));
        assert!(query.get::<Vec<usize>>("page").is_none());
    }
}
