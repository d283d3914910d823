//! Struct-shaped records read through their serde representation

use std::ops::Deref;

use serde::Serialize;

use super::Value;

/// A typed record exposed to the accessor through its serialized form.
///
/// Wraps any `T: Serialize`. The snapshot is taken once at construction, so
/// reading many paths from the same record serializes it only once. Column
/// transforms still see the typed value through `Deref`.
///
/// # Example
///
/// ```
/// use serde::Serialize;
/// use datatables_lib::accessor::Readable;
/// use datatables_lib::accessor::PropertyPath;
/// use datatables_lib::model::Reflected;
/// use datatables_lib::model::Value;
///
/// #[derive(Serialize)]
/// struct User { id: u32, name: String }
///
/// let user = Reflected::new(User { id: 7, name: "Ann".into() }).unwrap();
/// let path = PropertyPath::parse("name").unwrap();
/// assert_eq!(user.read(&path), Some(Value::from("Ann")));
/// assert_eq!(user.id, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Reflected<T> {
    inner: T,
    snapshot: Value,
}

impl<T: Serialize> Reflected<T> {
    /// Wraps a value, serializing it once.
    pub fn new(inner: T) -> Result<Self, serde_json::Error> {
        let snapshot = Value::from(serde_json::to_value(&inner)?);
        Ok(Self { inner, snapshot })
    }
}

impl<T> Reflected<T> {
    /// Returns the serialized snapshot that paths are read from.
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// Consumes the wrapper and returns the typed value.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Reflected<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}
