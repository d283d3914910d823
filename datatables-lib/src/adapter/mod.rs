//! Adapter template: from request state to result set.
//!
//! A backend implements [`Adapter`] with three hooks and [`run_query`] drives
//! them in a fixed order:
//!
//! 1. `prepare_query` - build the backend query, record row counts
//! 2. `map_property_path` - once per mapped column, not per row
//! 3. `get_results` - stream the records of the requested page
//!
//! Each record then becomes one [`Row`]: the identifier (if the backend set
//! an identifier path), then every column's transformed value in declared
//! order, then the table's row transformer, if any.
//!
//! Backend and transform errors abort the call. A path that cannot be read
//! from a record yields a `Null` value for that cell and nothing more.

mod array;
mod query;

pub use array::*;
pub use query::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use futures::stream::BoxStream;

use crate::accessor::PropertyPath;
use crate::accessor::Readable;
use crate::error::AdapterError;
use crate::error::Error;
use crate::error::TransformError;
use crate::model::Value;
use crate::result::ResultSet;
use crate::result::Row;
use crate::table::Column;
use crate::table::DataTableState;
use crate::table::RowTransformFn;

/// Forward-only stream of raw records produced by a backend.
pub type RecordStream<'a, R> = BoxStream<'a, Result<R, AdapterError>>;

/// A data source that can answer table queries.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use futures::stream;
/// use datatables_lib::adapter::{Adapter, AdapterQuery, RecordStream};
/// use datatables_lib::error::AdapterError;
/// use datatables_lib::model::Record;
/// use datatables_lib::table::Column;
///
/// struct Fixed(Vec<Record>);
///
/// #[async_trait]
/// impl Adapter for Fixed {
///     type Record = Record;
///
///     async fn prepare_query(
///         &self,
///         query: &mut AdapterQuery<'_, Record>,
///     ) -> Result<(), AdapterError> {
///         query.set_total_rows(self.0.len());
///         query.set_filtered_rows(self.0.len());
///         Ok(())
///     }
///
///     fn map_property_path(
///         &self,
///         _query: &AdapterQuery<'_, Record>,
///         column: &Column<Record>,
///     ) -> Option<String> {
///         column.get_field().map(str::to_string)
///     }
///
///     fn get_results<'a>(
///         &'a self,
///         _query: &'a mut AdapterQuery<'_, Record>,
///     ) -> RecordStream<'a, Record> {
///         Box::pin(stream::iter(self.0.iter().cloned().map(Ok)))
///     }
/// }
/// ```
#[async_trait]
pub trait Adapter: Send + Sync {
    /// The raw record type this backend yields.
    type Record: Readable + Send + Sync;

    /// Builds the backend query for the request state.
    ///
    /// Must populate `total_rows` and `filtered_rows`, here or while the
    /// stream from [`get_results`](Adapter::get_results) is consumed.
    async fn prepare_query(
        &self,
        query: &mut AdapterQuery<'_, Self::Record>,
    ) -> Result<(), AdapterError>;

    /// Translates a column's field into the path read from each record.
    ///
    /// Only called for columns with a field, once per column per query.
    /// Returning `None` or an empty path leaves the column unmapped.
    fn map_property_path(
        &self,
        query: &AdapterQuery<'_, Self::Record>,
        column: &Column<Self::Record>,
    ) -> Option<String>;

    /// Streams the records of the requested page, in output order.
    ///
    /// Paging and filtering must already be applied. The stream is consumed
    /// once and dropped before the query returns.
    fn get_results<'a>(
        &'a self,
        query: &'a mut AdapterQuery<'_, Self::Record>,
    ) -> RecordStream<'a, Self::Record>;

    /// Runs the full query for `state`.
    async fn get_data(
        &self,
        state: &DataTableState<'_, Self::Record>,
    ) -> Result<ResultSet, Error>
    where
        Self: Sized,
    {
        run_query(self, state).await
    }
}

/// Runs one query against `adapter` and assembles the result set.
///
/// No partial result is ever returned: the first error aborts the call.
pub async fn run_query<A>(
    adapter: &A,
    state: &DataTableState<'_, A::Record>,
) -> Result<ResultSet, Error>
where
    A: Adapter + ?Sized,
{
    let table = state.table();
    let mut query = AdapterQuery::new(state);

    adapter.prepare_query(&mut query).await?;

    let mut mappings = Vec::with_capacity(table.columns().len());
    for column in table.columns() {
        let mapping = match column.get_field() {
            Some(_) => adapter
                .map_property_path(&query, column)
                .filter(|path| !path.is_empty())
                .map(|path| parse_mapping(column.name(), &path))
                .transpose()?,
            None => None,
        };
        mappings.push((column, mapping));
    }
    log::debug!(
        "table '{}': mapped {} of {} columns",
        table.name(),
        mappings.iter().filter(|(_, m)| m.is_some()).count(),
        mappings.len()
    );

    let row_id_key = table.options().row_id_key.as_str();
    let identifier = query
        .identifier_property_path()
        .filter(|path| !path.is_empty())
        .map(|path| parse_mapping(row_id_key, path))
        .transpose()?;
    let transformer = table.transformer();

    let mut rows = Vec::new();
    {
        let mut results = adapter.get_results(&mut query);
        while let Some(record) = results.try_next().await? {
            let row = assemble_row(
                &record,
                identifier.as_ref().map(|path| (row_id_key, path)),
                &mappings,
                transformer,
            )?;
            rows.push(row);
        }
    }

    let total_rows = query
        .total_rows()
        .ok_or(AdapterError::CountsNotSet("total_rows"))?;
    let filtered_rows = query
        .filtered_rows()
        .ok_or(AdapterError::CountsNotSet("filtered_rows"))?;
    if filtered_rows > total_rows {
        return Err(AdapterError::InconsistentCounts {
            filtered: filtered_rows,
            total: total_rows,
        }
        .into());
    }

    log::debug!(
        "table '{}': {} rows assembled ({} filtered of {} total)",
        table.name(),
        rows.len(),
        filtered_rows,
        total_rows
    );
    Ok(ResultSet::new(rows, total_rows, filtered_rows))
}

fn parse_mapping(column: &str, path: &str) -> Result<PropertyPath, AdapterError> {
    PropertyPath::parse(path).map_err(|source| AdapterError::InvalidMapping {
        column: column.to_string(),
        source,
    })
}

/// Reads `path` from `record`, or `Null` if it is not readable.
fn read_or_null<R: Readable>(record: &R, path: &PropertyPath) -> Value {
    match record.read(path) {
        Some(value) => value,
        None => {
            log::trace!("path '{path}' not readable, using null");
            Value::Null
        }
    }
}

fn assemble_row<R: Readable>(
    record: &R,
    identifier: Option<(&str, &PropertyPath)>,
    mappings: &[(&Column<R>, Option<PropertyPath>)],
    transformer: Option<&RowTransformFn<R>>,
) -> Result<Row, TransformError> {
    let mut row = Row::with_capacity(mappings.len() + 1);
    if let Some((key, path)) = identifier {
        row.insert(key, read_or_null(record, path));
    }

    for (column, mapping) in mappings {
        let value = match mapping {
            Some(path) => read_or_null(record, path),
            None => Value::Null,
        };
        row.insert(column.name(), column.transform(value, record)?);
    }

    match transformer {
        Some(transform) => transform(row, record).map_err(TransformError::for_row),
        None => Ok(row),
    }
}
