//! Value enum for dynamic record fields and table cells

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use uuid::Uuid;

use super::Record;

/// A dynamic value read from a record or stored in a table cell.
///
/// Records expose their fields as `Value`s through the accessor, and column
/// transforms both receive and return them.
///
/// # Type Mapping
///
/// | Source | Rust Variant |
/// |--------|--------------|
/// | null / missing | `Null` |
/// | boolean | `Bool` |
/// | 32-bit integer | `Int` |
/// | 64-bit integer, JSON integer | `Long` |
/// | floating point | `Float` |
/// | exact decimal | `Decimal` |
/// | text | `String` |
/// | UUID | `Guid` |
/// | timestamp | `DateTime` |
/// | array | `List` |
/// | object / mapping | `Record` |
///
/// # Example
///
/// ```
/// use datatables_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested record.
    Record(Box<Record>),
    /// Raw JSON kept as-is (not descended into by conversions).
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Json(_) => "json",
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            Value::Json(serde_json::Value::Number(n)) => n.as_f64(),
            _ => None,
        }
    }

    /// Renders the value as plain text.
    ///
    /// `Null` renders as the empty string. Lists and records render as JSON.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Long(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Guid(g) => g.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Json(serde_json::Value::String(s)) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(i64::from(*n)),
            Value::Long(n) => Some(*n),
            _ => None,
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => self.as_i64().map(Decimal::from),
        }
    }

    /// Orders two values for sorting.
    ///
    /// `Null` sorts before everything, numbers compare numerically across
    /// numeric variants, timestamps chronologically, everything else by
    /// display string.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => return Ordering::Equal,
            (Value::Null, _) => return Ordering::Less,
            (_, Value::Null) => return Ordering::Greater,
            (Value::Bool(a), Value::Bool(b)) => return a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => return a.cmp(b),
            _ => {}
        }
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a.cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_decimal(), other.as_decimal()) {
            return a.cmp(&b);
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self.to_display_string().cmp(&other.to_display_string()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Box::new(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

/// Converts JSON into native variants.
///
/// Objects become [`Record`]s and arrays become lists, so paths can descend
/// into them. Integers that fit map to `Long`, other numbers to `Float`.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Long(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Json(n.into())),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(Box::new(Record::from(map))),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object_becomes_record() {
        let value = Value::from(json!({"name": "Ann", "tags": ["a", "b"], "age": 41}));
        let Value::Record(record) = value else {
            panic!("expected record");
        };
        assert_eq!(record.get_string("name").unwrap(), Some("Ann"));
        assert_eq!(record.get_long("age").unwrap(), Some(41));
        assert_eq!(
            record.get("tags"),
            Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Null.to_display_string(), "");
        assert_eq!(Value::from(12i32).to_display_string(), "12");
        assert_eq!(Value::from("x").to_display_string(), "x");
        assert_eq!(
            Value::List(vec![Value::from(1i64), Value::Null]).to_display_string(),
            "[1,null]"
        );
    }

    #[test]
    fn test_sort_cmp_numbers_across_variants() {
        assert_eq!(Value::Int(9).sort_cmp(&Value::Long(10)), Ordering::Less);
        assert_eq!(Value::Float(2.5).sort_cmp(&Value::Int(2)), Ordering::Greater);
        assert_eq!(Value::from("10").sort_cmp(&Value::from("9")), Ordering::Less);
    }

    #[test]
    fn test_sort_cmp_large_integers() {
        let a = Value::Long(9_007_199_254_740_993);
        let b = Value::Long(9_007_199_254_740_992);
        assert_eq!(a.sort_cmp(&b), Ordering::Greater);
        assert_eq!(b.sort_cmp(&a), Ordering::Less);
        assert_eq!(Value::Int(i32::MAX).sort_cmp(&Value::Long(i64::MAX)), Ordering::Less);
        assert_eq!(
            Value::Decimal(Decimal::from(9_007_199_254_740_993i64)).sort_cmp(&a),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_cmp_null_first() {
        assert_eq!(Value::Null.sort_cmp(&Value::from(0i32)), Ordering::Less);
        assert_eq!(Value::from("").sort_cmp(&Value::Null), Ordering::Greater);
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::List(vec![Value::from(1i32), Value::Null, Value::from("a")]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,null,"a"]"#);
    }
}
