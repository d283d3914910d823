//! Property access over arbitrary record shapes.
//!
//! A [`Readable`] record resolves a [`PropertyPath`] to a [`Value`] or
//! reports that the path cannot be read. Reading never fails loudly: a miss
//! is `None`, which the query template turns into a `Null` cell.
//!
//! Two record shapes are supported:
//!
//! - key mappings: [`Record`], `HashMap`/`BTreeMap` of values, raw JSON
//! - typed structs: [`Reflected`], read through their serde representation

mod path;
mod property_accessor;

pub use path::*;
pub use property_accessor::*;

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AccessError;
use crate::model::Record;
use crate::model::Reflected;
use crate::model::Value;

/// A record that values can be read from by path.
pub trait Readable {
    /// Returns the value at `path`, or `None` if the path cannot be read.
    ///
    /// A present `Null` leaf is readable and returns `Some(Value::Null)`.
    fn read(&self, path: &PropertyPath) -> Option<Value>;

    /// Returns `true` if `path` resolves against this record.
    fn is_readable(&self, path: &PropertyPath) -> bool {
        self.read(path).is_some()
    }

    /// Returns the value at `path`, or an error if it cannot be read.
    fn get_value(&self, path: &PropertyPath) -> Result<Value, AccessError> {
        self.read(path)
            .ok_or_else(|| AccessError::not_readable(path.as_str()))
    }
}

/// Walks `segments` starting at `current`.
///
/// Records resolve by key, lists by position. Raw JSON is walked in place and
/// only the leaf is converted.
fn descend(mut current: &Value, segments: &[Segment]) -> Option<Value> {
    for (i, segment) in segments.iter().enumerate() {
        current = match current {
            Value::Record(record) => record.get(segment.key())?,
            Value::List(items) => items.get(segment.position()?)?,
            Value::Json(json) => return descend_json(json, &segments[i..]),
            _ => return None,
        };
    }
    Some(current.clone())
}

fn descend_json(mut current: &serde_json::Value, segments: &[Segment]) -> Option<Value> {
    for segment in segments {
        current = match current {
            serde_json::Value::Object(map) => map.get(segment.key())?,
            serde_json::Value::Array(items) => items.get(segment.position()?)?,
            _ => return None,
        };
    }
    Some(Value::from(current.clone()))
}

fn read_mapping<'a>(
    lookup: impl FnOnce(&str) -> Option<&'a Value>,
    path: &PropertyPath,
) -> Option<Value> {
    let (first, rest) = path.segments().split_first()?;
    descend(lookup(first.key())?, rest)
}

impl Readable for Value {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        descend(self, path.segments())
    }
}

impl Readable for Record {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        read_mapping(|key| self.get(key), path)
    }
}

impl Readable for HashMap<String, Value> {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        read_mapping(|key| self.get(key), path)
    }
}

impl Readable for BTreeMap<String, Value> {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        read_mapping(|key| self.get(key), path)
    }
}

impl Readable for serde_json::Value {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        descend_json(self, path.segments())
    }
}

impl<T> Readable for Reflected<T> {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        descend(self.snapshot(), path.segments())
    }
}

impl<T: Readable + ?Sized> Readable for &T {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        (**self).read(path)
    }
}

impl<T: Readable + ?Sized> Readable for Box<T> {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        (**self).read(path)
    }
}

impl<T: Readable + ?Sized> Readable for Arc<T> {
    fn read(&self, path: &PropertyPath) -> Option<Value> {
        (**self).read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    fn path(p: &str) -> PropertyPath {
        PropertyPath::parse(p).unwrap()
    }

    fn sample() -> Record {
        serde_json::from_value(json!({
            "id": 1,
            "profile": {"name": "Ann", "nick": null},
            "orders": [{"total": 10}, {"total": 20}],
        }))
        .unwrap()
    }

    #[test]
    fn test_record_nested_paths() {
        let record = sample();
        assert_eq!(record.read(&path("id")), Some(Value::Long(1)));
        assert_eq!(record.read(&path("profile.name")), Some(Value::from("Ann")));
        assert_eq!(record.read(&path("[profile][name]")), Some(Value::from("Ann")));
        assert_eq!(record.read(&path("orders[1].total")), Some(Value::Long(20)));
    }

    #[test]
    fn test_null_leaf_is_readable() {
        let record = sample();
        assert!(record.is_readable(&path("profile.nick")));
        assert_eq!(record.get_value(&path("profile.nick")), Ok(Value::Null));
    }

    #[test]
    fn test_misses() {
        let record = sample();
        for p in [
            "missing",
            "profile.email",
            "profile.nick.first",
            "id.value",
            "orders[5].total",
            "orders[x]",
        ] {
            assert!(!record.is_readable(&path(p)), "{p} should not be readable");
        }
        assert_eq!(
            record.get_value(&path("profile.email")),
            Err(AccessError::not_readable("profile.email"))
        );
    }

    #[test]
    fn test_raw_json() {
        let json = json!({"a": {"b": [true, {"c": "deep"}]}});
        assert_eq!(json.read(&path("a.b[0]")), Some(Value::Bool(true)));
        assert_eq!(json.read(&path("a.b[1].c")), Some(Value::from("deep")));
        assert!(!json.is_readable(&path("a.c")));
    }

    #[test]
    fn test_json_variant_inside_value() {
        let value = Value::from(Record::new().set("raw", Value::Json(json!({"k": 5}))));
        assert_eq!(value.read(&path("raw.k")), Some(Value::Long(5)));
    }

    #[test]
    fn test_hash_map() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), Value::from("x"));
        assert_eq!(map.read(&path("name")), Some(Value::from("x")));
        assert_eq!(map.read(&path("name.first")), None);
    }

    #[test]
    fn test_reflected_struct() {
        #[derive(Serialize)]
        struct Profile {
            name: String,
        }
        #[derive(Serialize)]
        struct User {
            id: u32,
            profile: Option<Profile>,
        }

        let with = Reflected::new(User {
            id: 1,
            profile: Some(Profile { name: "Ann".into() }),
        })
        .unwrap();
        let without = Reflected::new(User { id: 2, profile: None }).unwrap();

        assert_eq!(with.read(&path("profile.name")), Some(Value::from("Ann")));
        assert_eq!(without.read(&path("profile")), Some(Value::Null));
        assert_eq!(without.read(&path("profile.name")), None);
        assert_eq!(without.id, 2);
    }
}
