//! Projected rows

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::model::Value;

/// One projected row: cells keyed by column name, in column order.
///
/// Serializes as a JSON object whose keys follow insertion order.
///
/// # Example
///
/// ```
/// use datatables_lib::model::Value;
/// use datatables_lib::result::Row;
///
/// let mut row = Row::new();
/// row.insert("id", 1i64);
/// row.insert("name", "Ann");
/// assert_eq!(row.keys().collect::<Vec<_>>(), ["id", "name"]);
/// assert_eq!(row.get("name"), Some(&Value::from("Ann")));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Creates an empty row with room for `capacity` cells.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Sets a cell. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    /// Sets a cell (builder pattern).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a cell and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.cells.iter().position(|(k, _)| k == key)?;
        Some(self.cells.remove(index).1)
    }

    /// Returns a cell value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the row has a cell for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the cell keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the cells in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the row and returns its cells.
    pub fn into_cells(self) -> Vec<(String, Value)> {
        self.cells
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
