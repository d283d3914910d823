//! Table options

use serde::Deserialize;
use serde::Serialize;

/// Row key under which the record identifier is stored by default.
pub const DEFAULT_ROW_ID_KEY: &str = "DT_RowId";

/// Per-table options.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete configuration.
///
/// # Example
///
/// ```
/// use datatables_lib::table::TableOptions;
///
/// let options = TableOptions::default()
///     .with_page_length(25)
///     .with_max_page_length(100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Rows per page when the request does not say.
    ///
    /// Default: 10
    pub page_length: usize,

    /// Upper bound on the rows per page a request may ask for.
    ///
    /// Default: unbounded
    pub max_page_length: Option<usize>,

    /// Row key for the record identifier.
    ///
    /// Default: `DT_RowId`
    pub row_id_key: String,

    /// Whether global and per-column search is honored.
    ///
    /// Default: true
    pub searching: bool,

    /// Whether sort directives are honored.
    ///
    /// Default: true
    pub ordering: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_length: 10,
            max_page_length: None,
            row_id_key: DEFAULT_ROW_ID_KEY.to_string(),
            searching: true,
            ordering: true,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page length.
    pub fn with_page_length(mut self, length: usize) -> Self {
        self.page_length = length;
        self
    }

    /// Sets the maximum page length.
    pub fn with_max_page_length(mut self, length: usize) -> Self {
        self.max_page_length = Some(length);
        self
    }

    /// Sets the row key used for the record identifier.
    pub fn with_row_id_key(mut self, key: impl Into<String>) -> Self {
        self.row_id_key = key.into();
        self
    }

    /// Enables or disables searching.
    pub fn with_searching(mut self, enabled: bool) -> Self {
        self.searching = enabled;
        self
    }

    /// Enables or disables ordering.
    pub fn with_ordering(mut self, enabled: bool) -> Self {
        self.ordering = enabled;
        self
    }

    /// Clamps a requested page length to `max_page_length`.
    pub fn clamp_length(&self, length: usize) -> usize {
        match self.max_page_length {
            Some(max) => length.min(max),
            None => length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: TableOptions = serde_json::from_str(r#"{"pageLength": 50}"#).unwrap();
        assert_eq!(options.page_length, 50);
        assert_eq!(options.row_id_key, "DT_RowId");
        assert!(options.searching);
        assert!(options.ordering);
    }

    #[test]
    fn test_clamp_length() {
        assert_eq!(TableOptions::new().clamp_length(500), 500);
        assert_eq!(
            TableOptions::new().with_max_page_length(100).clamp_length(500),
            100
        );
    }
}
