//! Sort directives

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("invalid sort direction '{other}'")),
        }
    }
}

/// A sort directive on one column, by position in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    /// Index of the column in the table definition.
    pub column: usize,
    /// Sort direction.
    pub direction: Direction,
}

/// A search term.
///
/// `regex` is carried for clients that send it. Backends decide whether to
/// honor it; the in-memory adapter matches the value as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Search {
    /// The text to search for.
    pub value: String,
    /// Whether the client asked for a regular expression match.
    #[serde(default)]
    pub regex: bool,
}

impl Search {
    /// Creates a literal search.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: false,
        }
    }

    /// Returns `true` if there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_parse_direction() {
        assert_eq!("asc".parse::<Direction>(), Ok(Direction::Asc));
        assert_eq!("DESC".parse::<Direction>(), Ok(Direction::Desc));
        assert!("up".parse::<Direction>().is_err());
    }

    #[test]
    fn test_apply() {
        assert_eq!(Direction::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Direction::Desc.apply(Ordering::Less), Ordering::Greater);
    }
}
