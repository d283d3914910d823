//! Per-request table state

use super::Column;
use super::DataTable;
use super::Direction;
use super::Order;
use super::Search;
use crate::error::ConfigError;

/// The requested view of a table for one client request.
///
/// Borrows the table definition and is read-only once built. Builder
/// methods validate column references against the table.
///
/// # Example
///
/// ```
/// use datatables_lib::model::Record;
/// use datatables_lib::table::{Column, DataTable, DataTableState, Direction};
///
/// let mut table = DataTable::<Record>::new("users");
/// table.add(Column::mapped("name")).unwrap();
///
/// let state = DataTableState::new(&table)
///     .with_start(20)
///     .with_search("ann")
///     .with_order("name", Direction::Desc)
///     .unwrap();
/// assert_eq!(state.length(), Some(10));
/// ```
#[derive(Debug)]
pub struct DataTableState<'t, R> {
    table: &'t DataTable<R>,
    draw: u64,
    start: usize,
    length: Option<usize>,
    global_search: Search,
    column_searches: Vec<(usize, Search)>,
    order: Vec<Order>,
}

impl<R> Clone for DataTableState<'_, R> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            draw: self.draw,
            start: self.start,
            length: self.length,
            global_search: self.global_search.clone(),
            column_searches: self.column_searches.clone(),
            order: self.order.clone(),
        }
    }
}

impl<'t, R> DataTableState<'t, R> {
    /// Creates a state for the first page at the table's default length.
    pub fn new(table: &'t DataTable<R>) -> Self {
        Self {
            table,
            draw: 0,
            start: 0,
            length: Some(table.options().clamp_length(table.options().page_length)),
            global_search: Search::default(),
            column_searches: Vec::new(),
            order: Vec::new(),
        }
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Sets the client draw counter echoed in the response.
    pub fn with_draw(mut self, draw: u64) -> Self {
        self.draw = draw;
        self
    }

    /// Sets the offset of the first row.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Sets the page length. `None` requests all rows, unless the table caps
    /// the page length, in which case the cap applies.
    pub fn with_length(mut self, length: Option<usize>) -> Self {
        let options = self.table.options();
        self.length = match length {
            Some(length) => Some(options.clamp_length(length)),
            None => options.max_page_length,
        };
        self
    }

    /// Sets the global search term.
    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.global_search = Search::new(value);
        self
    }

    /// Sets the global search.
    pub fn with_global_search(mut self, search: Search) -> Self {
        self.global_search = search;
        self
    }

    /// Adds a search restricted to one column.
    pub fn with_column_search(mut self, column: &str, search: Search) -> Result<Self, ConfigError> {
        let index = self.resolve(column)?;
        if !self.table.columns()[index].is_searchable() {
            return Err(ConfigError::NotSearchable(column.to_string()));
        }
        self.column_searches.retain(|(i, _)| *i != index);
        self.column_searches.push((index, search));
        Ok(self)
    }

    /// Appends a sort directive by column name.
    pub fn with_order(self, column: &str, direction: Direction) -> Result<Self, ConfigError> {
        let index = self.resolve(column)?;
        self.with_order_index(index, direction)
    }

    /// Appends a sort directive by column index.
    pub fn with_order_index(
        mut self,
        column: usize,
        direction: Direction,
    ) -> Result<Self, ConfigError> {
        let definition = self
            .table
            .column_at(column)
            .ok_or_else(|| ConfigError::UnknownColumn(column.to_string()))?;
        if !definition.is_orderable() {
            return Err(ConfigError::NotOrderable(definition.name().to_string()));
        }
        self.order.push(Order { column, direction });
        Ok(self)
    }

    fn resolve(&self, column: &str) -> Result<usize, ConfigError> {
        self.table
            .column_index(column)
            .ok_or_else(|| ConfigError::UnknownColumn(column.to_string()))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the table definition.
    pub fn table(&self) -> &'t DataTable<R> {
        self.table
    }

    /// Returns the client draw counter.
    pub fn draw(&self) -> u64 {
        self.draw
    }

    /// Returns the offset of the first row.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the page length, or `None` for all rows.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Returns the global search, if one was given.
    pub fn global_search(&self) -> Option<&Search> {
        (!self.global_search.is_empty()).then_some(&self.global_search)
    }

    /// Returns the non-empty per-column searches with their columns.
    pub fn column_searches(&self) -> impl Iterator<Item = (&'t Column<R>, &Search)> + '_ {
        let columns = self.table.columns();
        self.column_searches
            .iter()
            .filter(|(_, search)| !search.is_empty())
            .map(move |(index, search)| (&columns[*index], search))
    }

    /// Returns the sort directives in priority order.
    pub fn order(&self) -> &[Order] {
        &self.order
    }

    /// Returns the sort directives with their columns.
    pub fn order_columns(&self) -> impl Iterator<Item = (&'t Column<R>, Direction)> + '_ {
        let columns = self.table.columns();
        self.order
            .iter()
            .map(move |order| (&columns[order.column], order.direction))
    }
}
