//! Query results.

mod response;
mod row;

pub use response::*;
pub use row::*;

use serde::Serialize;

/// The normalized output of one table query.
///
/// `total_rows` counts records ignoring all filters; `filtered_rows` counts
/// records matching the filters, before paging. `rows` holds only the
/// requested page, in backend order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    rows: Vec<Row>,
    total_rows: usize,
    filtered_rows: usize,
}

impl ResultSet {
    /// Creates a result set.
    pub fn new(rows: Vec<Row>, total_rows: usize, filtered_rows: usize) -> Self {
        Self {
            rows,
            total_rows,
            filtered_rows,
        }
    }

    /// Returns the rows of the requested page.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the result set and returns the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the record count ignoring filters.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns the record count after filters, before paging.
    pub fn filtered_rows(&self) -> usize {
        self.filtered_rows
    }

    /// Returns `true` if the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in the page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Builds the client response for this result.
    pub fn into_response(self, draw: u64) -> TableResponse {
        TableResponse {
            draw,
            records_total: self.total_rows,
            records_filtered: self.filtered_rows,
            data: self.rows,
        }
    }
}
