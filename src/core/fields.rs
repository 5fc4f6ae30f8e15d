//! Structured key-value fields attached to log records
//!
//! This module provides:
//! - `FieldValue`: the closed set of value kinds a field can hold
//! - `Fields`: an insertion-ordered field set owned by each logger

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Value type for structured logging fields
///
/// Every kind has exactly one text rendering (`Display`) and one structured
/// encoding (`Serialize`). `Opaque` carries values that have no structured
/// encoding; text output shows their debug form, structured output rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    Array(Vec<FieldValue>),
    Map(Fields),
    Opaque { type_name: String, repr: String },
}

impl FieldValue {
    /// Capture a value that only implements `Debug`.
    ///
    /// ```
    /// use titanlog::FieldValue;
    ///
    /// let value = FieldValue::opaque(&std::time::Duration::from_millis(5));
    /// assert_eq!(value.to_string(), "5ms");
    /// ```
    pub fn opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        FieldValue::Opaque {
            type_name: std::any::type_name::<T>().to_string(),
            repr: format!("{:?}", value),
        }
    }

    /// Short name of the value kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Int(_) | FieldValue::UInt(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Null => "null",
            FieldValue::Array(_) => "array",
            FieldValue::Map(_) => "map",
            FieldValue::Opaque { .. } => "opaque",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Array(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Map(fields) => {
                f.write_str("{")?;
                for (idx, (key, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            FieldValue::Opaque { repr, .. } => f.write_str(repr),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::UInt(u) => serializer.serialize_u64(*u),
            FieldValue::Float(fl) if fl.is_finite() => serializer.serialize_f64(*fl),
            FieldValue::Float(fl) => Err(S::Error::custom(format!("unsupported value: {}", fl))),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Array(items) => serializer.collect_seq(items),
            FieldValue::Map(fields) => fields.serialize(serializer),
            FieldValue::Opaque { type_name, .. } => {
                Err(S::Error::custom(format!("unsupported type: {}", type_name)))
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldValue {
            fn from(i: $ty) -> Self {
                FieldValue::Int(i as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for FieldValue {
            fn from(u: $ty) -> Self {
                FieldValue::UInt(u as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Fields> for FieldValue {
    fn from(fields: Fields) -> Self {
        FieldValue::Map(fields)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => FieldValue::Map(map.into_iter().collect()),
        }
    }
}

/// Insertion-ordered set of structured fields
///
/// The first insertion of a key fixes its position; inserting the same key
/// again replaces the value in place. Cloning produces an independent copy,
/// which is what loggers rely on when deriving child loggers.
///
/// # Example
///
/// ```
/// use titanlog::Fields;
///
/// let fields = Fields::new()
///     .with_field("user_id", 12345)
///     .with_field("action", "payment");
///
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields.get("action").and_then(|v| v.as_str()), Some("payment"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a field and return the set (builder style)
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field, returning the previous value
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Overlay `other` onto this set; values from `other` win on collision
    pub fn extend_from(&mut self, other: &Fields) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// New set equal to `self` overlaid by `overlay`; neither input changes
    #[must_use]
    pub fn merged(&self, overlay: &Fields) -> Fields {
        let mut merged = self.clone();
        merged.extend_from(overlay);
        merged
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<K: Into<String>, V: Into<FieldValue>> Extend<(K, V)> for Fields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: Into<FieldValue>> From<HashMap<String, V>> for Fields {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<V: Into<FieldValue>> From<BTreeMap<String, V>> for Fields {
    fn from(map: BTreeMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_creation() {
        let fields = Fields::new();
        assert!(fields.is_empty());
        assert_eq!(fields.len(), 0);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut fields = Fields::new()
            .with_field("a", 1)
            .with_field("b", 2);

        let previous = fields.insert("a", "one");
        assert_eq!(previous, Some(FieldValue::Int(1)));
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(fields.get("a"), Some(&FieldValue::from("one")));
    }

    #[test]
    fn test_merged_overlay_wins() {
        let base = Fields::new().with_field("service", "api").with_field("user", "alice");
        let overlay = Fields::new().with_field("user", "bob").with_field("trace", 7u32);

        let merged = base.merged(&overlay);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("user").and_then(FieldValue::as_str), Some("bob"));
        assert_eq!(merged.get("trace"), Some(&FieldValue::UInt(7)));

        // inputs are untouched
        assert_eq!(base.get("user").and_then(FieldValue::as_str), Some("alice"));
        assert!(!base.contains_key("trace"));
    }

    #[test]
    fn test_remove() {
        let mut fields = Fields::new().with_field("k1", 1).with_field("k2", 2);
        assert_eq!(fields.remove("k1"), Some(FieldValue::Int(1)));
        assert_eq!(fields.remove("k1"), None);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_display_per_kind() {
        assert_eq!(FieldValue::from("plain").to_string(), "plain");
        assert_eq!(FieldValue::from(-3).to_string(), "-3");
        assert_eq!(FieldValue::from(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::from(f64::NAN).to_string(), "NaN");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::from(None::<i32>).to_string(), "null");
        assert_eq!(FieldValue::from(vec![1, 2, 3]).to_string(), "[1, 2, 3]");

        let nested = FieldValue::from(Fields::new().with_field("x", 1).with_field("y", "z"));
        assert_eq!(nested.to_string(), "{x: 1, y: z}");
    }

    #[test]
    fn test_serialize_nested() {
        let fields = Fields::new()
            .with_field("tags", vec!["a", "b"])
            .with_field("geo", Fields::new().with_field("lat", 1.25).with_field("ok", true));

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["tags"], serde_json::json!(["a", "b"]));
        assert_eq!(json["geo"]["lat"], 1.25);
        assert_eq!(json["geo"]["ok"], true);
    }

    #[test]
    fn test_serialize_rejects_unencodable() {
        let infinite = Fields::new().with_field("ratio", f64::INFINITY);
        let err = serde_json::to_string(&infinite).unwrap_err();
        assert!(err.to_string().contains("unsupported value"));

        let opaque = Fields::new().with_field("handle", FieldValue::opaque(&std::sync::Mutex::new(1)));
        let err = serde_json::to_string(&opaque).unwrap_err();
        assert!(err.to_string().contains("unsupported type"));
    }

    #[test]
    fn test_from_json_value() {
        let value = serde_json::json!({"id": 1, "big": u64::MAX, "f": 0.5, "list": [null]});
        match FieldValue::from(value) {
            FieldValue::Map(fields) => {
                assert_eq!(fields.get("id"), Some(&FieldValue::Int(1)));
                assert_eq!(fields.get("big"), Some(&FieldValue::UInt(u64::MAX)));
                assert_eq!(fields.get("f"), Some(&FieldValue::Float(0.5)));
                assert_eq!(fields.get("list"), Some(&FieldValue::Array(vec![FieldValue::Null])));
            }
            other => panic!("Expected map, got {:?}", other),
        }
    }
}
