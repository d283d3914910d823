//! Serde support for Record.
//!
//! Records serialize as JSON objects with keys in sorted order, so the same
//! record always produces the same bytes. They deserialize from any map;
//! nested objects become nested records and arrays become lists.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut keys: Vec<&String> = self.fields.keys().collect();
        keys.sort();

        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            map.serialize_entry(key, &self.fields[key])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();
        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;
            record.insert(key, Value::from(value));
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_sorted_keys() {
        let record = Record::new()
            .set("name", "Contoso")
            .set("revenue", 1_000_000i64)
            .set("active", true);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"active":true,"name":"Contoso","revenue":1000000}"#);
    }

    #[test]
    fn test_serialize_keeps_nulls() {
        let record = Record::new().set("note", Value::Null);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"note":null}"#);
    }

    #[test]
    fn test_deserialize_nested() {
        let json = r#"{"id": 1, "profile": {"name": "Ann"}, "tags": ["x"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.get_long("id").unwrap(), Some(1));
        let profile = record.get_record("profile").unwrap().unwrap();
        assert_eq!(profile.get_string("name").unwrap(), Some("Ann"));
        assert_eq!(record.get_list("tags").unwrap().map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        assert!(serde_json::from_str::<Record>("[1, 2]").is_err());
    }
}
