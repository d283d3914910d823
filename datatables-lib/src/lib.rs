//! Row projection for paginated tables
//!
//! Turns a table request (page, search, sort) against any data source into
//! a uniform result: ordered rows of named cell values plus total and
//! filtered row counts. Backends implement [`adapter::Adapter`]; columns
//! decide how each cell is formatted; an optional row transformer reshapes
//! whole rows.

pub mod accessor;
pub mod adapter;
pub mod error;
pub mod model;
pub mod result;
pub mod table;

pub use adapter::Adapter;
pub use adapter::run_query;
pub use error::Error;
pub use result::ResultSet;
pub use result::Row;
