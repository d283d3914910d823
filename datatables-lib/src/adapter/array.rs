//! In-memory adapter over a vector of records

use std::cmp::Ordering;

use async_trait::async_trait;

use super::Adapter;
use super::AdapterQuery;
use super::RecordStream;
use crate::accessor::PropertyAccessor;
use crate::accessor::Readable;
use crate::error::AdapterError;
use crate::model::Value;
use crate::table::Column;
use crate::table::DataTableState;
use crate::table::Direction;

const PAGE_KEY: &str = "array.page";

/// Serves table queries from records held in memory.
///
/// Search, sort and paging are applied in `prepare_query`:
///
/// - the global search keeps records where any searchable, mapped column
///   contains the term (case-insensitive, literal)
/// - each column search on a mapped column keeps records where that column
///   contains its term; searches on unmapped columns are ignored
/// - sorting is stable and follows the state's directives in order
/// - `start`/`length` select the page
///
/// # Example
///
/// ```
/// use datatables_lib::adapter::{Adapter, ArrayAdapter};
/// use datatables_lib::model::Record;
/// use datatables_lib::table::{Column, DataTable, DataTableState};
///
/// # futures::executor::block_on(async {
/// let mut table = DataTable::<Record>::new("users");
/// table.add(Column::mapped("name")).unwrap();
///
/// let adapter = ArrayAdapter::new(vec![
///     Record::new().set("name", "Ann"),
///     Record::new().set("name", "Bob"),
/// ]);
/// let state = DataTableState::new(&table).with_search("bo");
/// let result = adapter.get_data(&state).await.unwrap();
///
/// assert_eq!(result.total_rows(), 2);
/// assert_eq!(result.filtered_rows(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct ArrayAdapter<R> {
    records: Vec<R>,
    identifier: Option<String>,
    accessor: PropertyAccessor,
}

impl<R> ArrayAdapter<R> {
    /// Creates an adapter over `records`.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            identifier: None,
            accessor: PropertyAccessor::new(),
        }
    }

    /// Sets the path that identifies each record.
    pub fn with_identifier(mut self, path: impl Into<String>) -> Self {
        self.identifier = Some(path.into());
        self
    }

    /// Returns the records.
    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: Readable> ArrayAdapter<R> {
    fn cell(&self, record: &R, column: &Column<R>) -> Option<Value> {
        let field = column.get_field()?;
        Some(self.accessor.value_or_null(record, field))
    }

    fn contains(&self, record: &R, column: &Column<R>, needle: &str) -> bool {
        self.cell(record, column)
            .map(|value| value.to_display_string().to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    fn matches(&self, record: &R, state: &DataTableState<'_, R>) -> bool {
        if let Some(search) = state.global_search() {
            let needle = search.value.to_lowercase();
            let hit = state
                .table()
                .columns()
                .iter()
                .filter(|column| column.is_searchable())
                .any(|column| self.contains(record, column, &needle));
            if !hit {
                return false;
            }
        }

        state
            .column_searches()
            .filter(|(column, _)| column.get_field().is_some())
            .all(|(column, search)| self.contains(record, column, &search.value.to_lowercase()))
    }

    fn compare(&self, a: &R, b: &R, order: &[(&Column<R>, Direction)]) -> Ordering {
        for (column, direction) in order {
            let ordering = match (self.cell(a, column), self.cell(b, column)) {
                (Some(left), Some(right)) => left.sort_cmp(&right),
                _ => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return direction.apply(ordering);
            }
        }
        Ordering::Equal
    }
}

#[async_trait]
impl<R> Adapter for ArrayAdapter<R>
where
    R: Readable + Clone + Send + Sync,
{
    type Record = R;

    async fn prepare_query(&self, query: &mut AdapterQuery<'_, R>) -> Result<(), AdapterError> {
        let state = query.state();
        let options = state.table().options();

        query.set_total_rows(self.records.len());
        if let Some(identifier) = &self.identifier {
            query.set_identifier_property_path(identifier.clone());
        }

        let mut matched: Vec<usize> = if options.searching {
            (0..self.records.len())
                .filter(|&i| self.matches(&self.records[i], state))
                .collect()
        } else {
            (0..self.records.len()).collect()
        };
        query.set_filtered_rows(matched.len());

        if options.ordering && !state.order().is_empty() {
            let order: Vec<_> = state.order_columns().collect();
            matched.sort_by(|&a, &b| self.compare(&self.records[a], &self.records[b], &order));
        }

        let page: Vec<usize> = match state.length() {
            Some(length) => matched.into_iter().skip(state.start()).take(length).collect(),
            None => matched.into_iter().skip(state.start()).collect(),
        };
        log::debug!(
            "array adapter: {} of {} records on page starting at {}",
            page.len(),
            self.records.len(),
            state.start()
        );
        query.set(PAGE_KEY, page);
        Ok(())
    }

    fn map_property_path(
        &self,
        _query: &AdapterQuery<'_, R>,
        column: &Column<R>,
    ) -> Option<String> {
        column.get_field().map(str::to_string)
    }

    fn get_results<'a>(&'a self, query: &'a mut AdapterQuery<'_, R>) -> RecordStream<'a, R> {
        let page = query.take::<Vec<usize>>(PAGE_KEY).unwrap_or_default();
        Box::pin(async_stream::stream! {
            for index in page {
                yield Ok::<R, AdapterError>(self.records[index].clone());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::table::DataTable;
    use crate::table::Search;
    use crate::table::TableOptions;

    fn people() -> Vec<Record> {
        [("Ann", 41i64, "Oslo"), ("bob", 29, "Paris"), ("Cid", 35, "Rome"), ("Dee", 29, "Oslo")]
            .into_iter()
            .map(|(name, age, city)| {
                Record::new()
                    .set("name", name)
                    .set("age", age)
                    .set("address", Record::new().set("city", city))
            })
            .collect()
    }

    fn table() -> DataTable<Record> {
        let mut table = DataTable::new("people");
        table
            .add(Column::mapped("name"))
            .unwrap()
            .add(Column::mapped("age"))
            .unwrap()
            .add(Column::new("city").field("address.city"))
            .unwrap()
            .add(Column::new("secret").field("name").searchable(false))
            .unwrap();
        table
    }

    fn names(result: &crate::result::ResultSet) -> Vec<String> {
        result
            .rows()
            .iter()
            .map(|row| row.get("name").unwrap().to_display_string())
            .collect()
    }

    #[tokio::test]
    async fn test_unfiltered_first_page() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table).with_length(Some(2));

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["Ann", "bob"]);
        assert_eq!(result.total_rows(), 4);
        assert_eq!(result.filtered_rows(), 4);
    }

    #[tokio::test]
    async fn test_global_search_is_case_insensitive() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table).with_search("OSLO");

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["Ann", "Dee"]);
        assert_eq!(result.filtered_rows(), 2);
        assert_eq!(result.total_rows(), 4);
    }

    #[tokio::test]
    async fn test_column_search() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table)
            .with_column_search("age", Search::new("29"))
            .unwrap()
            .with_column_search("city", Search::new("par"))
            .unwrap();

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["bob"]);
    }

    #[tokio::test]
    async fn test_searching_disabled() {
        let table = table().with_options(TableOptions::new().with_searching(false));
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table).with_search("zzz");

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(result.filtered_rows(), 4);
    }

    #[tokio::test]
    async fn test_multi_column_sort_is_stable() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table)
            .with_order("age", Direction::Asc)
            .unwrap()
            .with_order("name", Direction::Desc)
            .unwrap();

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["bob", "Dee", "Cid", "Ann"]);
    }

    #[tokio::test]
    async fn test_ordering_disabled_keeps_input_order() {
        let table = table().with_options(TableOptions::new().with_ordering(false));
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table)
            .with_order("age", Direction::Desc)
            .unwrap();

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["Ann", "bob", "Cid", "Dee"]);
    }

    #[tokio::test]
    async fn test_paging_after_filtering() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table)
            .with_search("o")
            .with_start(1)
            .with_length(Some(1));

        // "o" matches Ann (Oslo), bob, Cid (Rome), Dee (Oslo)
        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(names(&result), ["bob"]);
        assert_eq!(result.filtered_rows(), 4);
    }

    #[tokio::test]
    async fn test_start_past_end() {
        let table = table();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table).with_start(10);

        let result = adapter.get_data(&state).await.unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total_rows(), 4);
    }

    #[tokio::test]
    async fn test_identifier() {
        let table = table();
        let adapter = ArrayAdapter::new(people()).with_identifier("name");
        let state = DataTableState::new(&table).with_length(Some(1));

        let result = adapter.get_data(&state).await.unwrap();
        let row = &result.rows()[0];
        assert_eq!(row.get("DT_RowId"), Some(&Value::from("Ann")));
        assert_eq!(
            row.keys().collect::<Vec<_>>(),
            ["DT_RowId", "name", "age", "city", "secret"]
        );
    }

    #[tokio::test]
    async fn test_column_search_on_unmapped_column_is_ignored() {
        let mut table = table();
        table
            .add(Column::new("initials").with_transform(|_, record: &Record| {
                Ok(Value::from(record.get_string("name")?.unwrap_or_default()))
            }))
            .unwrap();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table)
            .with_column_search("initials", Search::new("zzz"))
            .unwrap();

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(result.filtered_rows(), 4);
        assert_eq!(names(&result), ["Ann", "bob", "Cid", "Dee"]);
    }

    #[tokio::test]
    async fn test_sort_large_ids() {
        let mut table = DataTable::<Record>::new("t");
        table.add(Column::mapped("id")).unwrap();
        let adapter = ArrayAdapter::new(vec![
            Record::new().set("id", 9_007_199_254_740_993i64),
            Record::new().set("id", 9_007_199_254_740_992i64),
        ]);
        let state = DataTableState::new(&table)
            .with_order("id", Direction::Asc)
            .unwrap();

        let result = adapter.get_data(&state).await.unwrap();
        let ids: Vec<_> = result.rows().iter().map(|row| row.get("id").cloned()).collect();
        assert_eq!(
            ids,
            [
                Some(Value::Long(9_007_199_254_740_992)),
                Some(Value::Long(9_007_199_254_740_993)),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_searchable_column_ignored() {
        let mut table = DataTable::<Record>::new("t");
        table
            .add(Column::new("hidden").field("name").searchable(false))
            .unwrap();
        let adapter = ArrayAdapter::new(people());
        let state = DataTableState::new(&table).with_search("ann");

        let result = adapter.get_data(&state).await.unwrap();
        assert_eq!(result.filtered_rows(), 0);
    }
}
