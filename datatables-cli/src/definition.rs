//! Table definition files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use datatables_lib::model::Record;
use datatables_lib::model::Value;
use datatables_lib::table::Column;
use datatables_lib::table::DataTable;
use datatables_lib::table::TableOptions;
use serde::Deserialize;

/// A table definition as stored on disk.
///
/// ```json
/// {
///   "name": "users",
///   "identifier": "id",
///   "columns": [
///     {"name": "id"},
///     {"name": "name", "field": "profile.name", "default": "-"},
///     {"name": "notes", "field": "", "searchable": false}
///   ],
///   "options": {"pageLength": 25}
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct TableFile {
    pub name: String,
    #[serde(default)]
    pub identifier: Option<String>,
    pub columns: Vec<ColumnFile>,
    #[serde(default)]
    pub options: TableOptions,
}

/// One column of a [`TableFile`].
///
/// `field` defaults to the column name; an empty string makes the column
/// unmapped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFile {
    pub name: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "enabled")]
    pub orderable: bool,
    #[serde(default = "enabled")]
    pub searchable: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

fn enabled() -> bool {
    true
}

impl TableFile {
    /// Reads a definition from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open table definition {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid table definition {}", path.display()))
    }

    /// Builds the table.
    pub fn build(self) -> anyhow::Result<DataTable<Record>> {
        let mut table = DataTable::new(self.name).with_options(self.options);
        for spec in self.columns {
            let field = spec.field.unwrap_or_else(|| spec.name.clone());
            let mut column = Column::new(spec.name)
                .field(field)
                .orderable(spec.orderable)
                .searchable(spec.searchable);
            if let Some(label) = spec.label {
                column = column.label(label);
            }
            if let Some(default) = spec.default {
                column = column.default_value(Value::from(default));
            }
            table.add(column)?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_json() {
        let file: TableFile = serde_json::from_str(
            r#"{
                "name": "users",
                "identifier": "id",
                "columns": [
                    {"name": "id"},
                    {"name": "name", "field": "profile.name", "default": "-"},
                    {"name": "notes", "field": "", "searchable": false}
                ],
                "options": {"pageLength": 25}
            }"#,
        )
        .unwrap();
        assert_eq!(file.identifier.as_deref(), Some("id"));

        let table = file.build().unwrap();
        assert_eq!(table.options().page_length, 25);
        assert_eq!(table.columns()[0].get_field(), Some("id"));
        assert_eq!(table.columns()[1].get_field(), Some("profile.name"));
        assert_eq!(table.columns()[2].get_field(), None);
        assert!(!table.columns()[2].is_searchable());
    }

    #[test]
    fn test_duplicate_columns_fail() {
        let file: TableFile = serde_json::from_str(
            r#"{"name": "t", "columns": [{"name": "a"}, {"name": "a"}]}"#,
        )
        .unwrap();
        assert!(file.build().is_err());
    }
}
