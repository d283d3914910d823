//! Parsed property paths.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// One element of a [`PropertyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named property: `name` or `.name`.
    Property(String),
    /// A bracketed index or key: `[0]` or `[name]`.
    Index(String),
}

impl Segment {
    /// Returns the key this segment looks up, without delimiters.
    pub fn key(&self) -> &str {
        match self {
            Segment::Property(k) | Segment::Index(k) => k,
        }
    }

    /// Returns the key as a list position, if it is an unsigned integer.
    pub fn position(&self) -> Option<usize> {
        self.key().parse().ok()
    }
}

/// A field path such as `profile.name`, `a.b[0].c` or `[profile][name]`.
///
/// Paths are parsed once and then resolved against any number of records.
///
/// # Example
///
/// ```
/// use datatables_lib::accessor::PropertyPath;
/// use datatables_lib::accessor::Segment;
///
/// let path = PropertyPath::parse("orders[0].total").unwrap();
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::Property("orders".into()),
///         Segment::Index("0".into()),
///         Segment::Property("total".into()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<Segment>,
}

impl PropertyPath {
    /// Parses a path string.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::new(path, 0, "path is empty"));
        }

        let bytes = path.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos] == b'[' {
                let close = path[pos + 1..]
                    .find(']')
                    .map(|offset| pos + 1 + offset)
                    .ok_or_else(|| PathError::new(path, pos, "unclosed '['"))?;
                if close == pos + 1 {
                    return Err(PathError::new(path, pos, "empty index"));
                }
                segments.push(Segment::Index(path[pos + 1..close].to_string()));
                pos = close + 1;
                continue;
            }

            if !segments.is_empty() {
                if bytes[pos] != b'.' {
                    return Err(PathError::new(path, pos, "expected '.' or '['"));
                }
                pos += 1;
            }

            let start = pos;
            while pos < bytes.len() && bytes[pos] != b'.' && bytes[pos] != b'[' {
                if bytes[pos] == b']' {
                    return Err(PathError::new(path, pos, "unexpected ']'"));
                }
                pos += 1;
            }
            if start == pos {
                return Err(PathError::new(path, start, "empty property name"));
            }
            segments.push(Segment::Property(path[start..pos].to_string()));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// Returns the path as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments. Never empty.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; parsing rejects empty paths.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
