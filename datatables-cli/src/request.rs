//! Command-line request arguments

use anyhow::Context;
use anyhow::bail;
use datatables_lib::model::Record;
use datatables_lib::table::DataTableState;
use datatables_lib::table::Direction;
use datatables_lib::table::Search;

/// Parses `COLUMN` or `COLUMN:asc|desc`.
pub fn parse_order(arg: &str) -> anyhow::Result<(String, Direction)> {
    match arg.split_once(':') {
        Some((column, direction)) => {
            let direction = direction.parse::<Direction>().map_err(anyhow::Error::msg)?;
            Ok((column.to_string(), direction))
        }
        None => Ok((arg.to_string(), Direction::Asc)),
    }
}

/// Parses `COLUMN=TEXT`.
pub fn parse_filter(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((column, text)) if !column.is_empty() => Ok((column.to_string(), text.to_string())),
        _ => bail!("Expected COLUMN=TEXT, got '{arg}'"),
    }
}

/// Applies sort and per-column search arguments to a state.
pub fn apply<'t>(
    mut state: DataTableState<'t, Record>,
    orders: &[String],
    filters: &[String],
) -> anyhow::Result<DataTableState<'t, Record>> {
    for arg in orders {
        let (column, direction) = parse_order(arg)?;
        state = state
            .with_order(&column, direction)
            .with_context(|| format!("Invalid --order '{arg}'"))?;
    }
    for arg in filters {
        let (column, text) = parse_filter(arg)?;
        state = state
            .with_column_search(&column, Search::new(text))
            .with_context(|| format!("Invalid --filter '{arg}'"))?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order("name").unwrap(), ("name".into(), Direction::Asc));
        assert_eq!(parse_order("age:desc").unwrap(), ("age".into(), Direction::Desc));
        assert!(parse_order("age:sideways").is_err());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter("city=Oslo").unwrap(), ("city".into(), "Oslo".into()));
        assert_eq!(parse_filter("note=").unwrap(), ("note".into(), String::new()));
        assert!(parse_filter("=x").is_err());
        assert!(parse_filter("city").is_err());
    }
}
