//! Client response payload

use serde::Serialize;

use super::Row;

/// The payload a table client expects for one draw.
///
/// # Example
///
/// ```
/// use datatables_lib::result::{ResultSet, Row};
///
/// let result = ResultSet::new(vec![Row::new().set("id", 1i64)], 10, 4);
/// let json = serde_json::to_string(&result.into_response(3)).unwrap();
/// assert_eq!(
///     json,
///     r#"{"draw":3,"recordsTotal":10,"recordsFiltered":4,"data":[{"id":1}]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    /// Draw counter echoed from the request.
    pub draw: u64,
    /// Record count ignoring filters.
    pub records_total: usize,
    /// Record count after filters, before paging.
    pub records_filtered: usize,
    /// Rows of the requested page.
    pub data: Vec<Row>,
}
