//! String-path accessor with a parsed-path cache

use std::sync::Arc;

use dashmap::DashMap;

use super::PropertyPath;
use super::Readable;
use crate::error::AccessError;
use crate::error::PathError;
use crate::model::Value;

/// Reads values from records by path string.
///
/// Each distinct path string is parsed once and cached, so per-record
/// lookups in hot loops (searching, sorting) only walk the record.
/// Thread-safe; share one accessor per adapter.
///
/// # Example
///
/// ```
/// use datatables_lib::accessor::PropertyAccessor;
/// use datatables_lib::model::Record;
/// use datatables_lib::model::Value;
///
/// let accessor = PropertyAccessor::new();
/// let record = Record::new().set("name", "Ann");
///
/// assert!(accessor.is_readable(&record, "name"));
/// assert_eq!(accessor.get_value(&record, "name").unwrap(), Value::from("Ann"));
/// assert!(!accessor.is_readable(&record, "name.first"));
/// ```
#[derive(Debug, Default)]
pub struct PropertyAccessor {
    paths: DashMap<String, Arc<PropertyPath>>,
}

impl PropertyAccessor {
    /// Creates an accessor with an empty path cache.
    pub fn new() -> Self {
        Self {
            paths: DashMap::new(),
        }
    }

    /// Returns the parsed form of `path`, parsing it on first use.
    pub fn property_path(&self, path: &str) -> Result<Arc<PropertyPath>, PathError> {
        if let Some(parsed) = self.paths.get(path) {
            return Ok(Arc::clone(parsed.value()));
        }
        let parsed = Arc::new(PropertyPath::parse(path)?);
        self.paths.insert(path.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Returns `true` if `path` is valid and resolves against `record`.
    pub fn is_readable<R: Readable + ?Sized>(&self, record: &R, path: &str) -> bool {
        match self.property_path(path) {
            Ok(parsed) => record.is_readable(&parsed),
            Err(_) => false,
        }
    }

    /// Reads the value at `path`.
    pub fn get_value<R: Readable + ?Sized>(
        &self,
        record: &R,
        path: &str,
    ) -> Result<Value, AccessError> {
        let parsed = self.property_path(path)?;
        record.get_value(&parsed)
    }

    /// Reads the value at `path`, substituting `Null` for any miss.
    pub fn value_or_null<R: Readable + ?Sized>(&self, record: &R, path: &str) -> Value {
        match self.get_value(record, path) {
            Ok(value) => value,
            Err(err) => {
                log::trace!("{err}");
                Value::Null
            }
        }
    }

    /// Returns the number of cached paths.
    pub fn cached_paths(&self) -> usize {
        self.paths.len()
    }

    /// Drops all cached paths.
    pub fn clear(&self) {
        self.paths.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_caches_each_path_once() {
        let accessor = PropertyAccessor::new();
        let record = Record::new().set("a", 1i32);

        for _ in 0..3 {
            assert!(accessor.is_readable(&record, "a"));
        }
        assert!(!accessor.is_readable(&record, "b"));
        assert_eq!(accessor.cached_paths(), 2);

        let first = accessor.property_path("a").unwrap();
        let second = accessor.property_path("a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalid_path_is_not_readable() {
        let accessor = PropertyAccessor::new();
        let record = Record::new();

        assert!(!accessor.is_readable(&record, "a..b"));
        assert!(matches!(
            accessor.get_value(&record, "a..b"),
            Err(AccessError::InvalidPath(_))
        ));
        assert_eq!(accessor.cached_paths(), 0);
    }

    #[test]
    fn test_value_or_null() {
        let accessor = PropertyAccessor::new();
        let record = Record::new().set("a", "x");
        assert_eq!(accessor.value_or_null(&record, "a"), Value::from("x"));
        assert_eq!(accessor.value_or_null(&record, "b"), Value::Null);
    }
}
