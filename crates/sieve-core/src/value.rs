//! Dynamic value model judged by validators
//!
//! Copyright (c) 2025 Sieve Team
//! Licensed under the Apache-2.0 license

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Key of a mapping value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// String key
    Str(String),
    /// Integer key
    Int(i64),
}

impl Key {
    /// Convert the key into a value, as seen by key validators
    pub fn to_value(&self) -> Value {
        match self {
            Key::Str(s) => Value::String(s.clone()),
            Key::Int(i) => Value::Int(*i),
        }
    }

    fn repr(&self) -> String {
        match self {
            Key::Str(s) => format!("'{}'", s),
            Key::Int(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Key::Str(key.to_string())
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key::Str(key)
    }
}

impl From<i64> for Key {
    fn from(key: i64) -> Self {
        Key::Int(key)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Str(s) => serializer.serialize_str(s),
            Key::Int(i) => serializer.serialize_i64(*i),
        }
    }
}

/// Accessor for structured records validated by
/// [`ModelValidate`](crate::ModelValidate)
///
/// Field names returned by [`field_names`](Model::field_names) are storage
/// names. A record that exposes a field under a different name than the one
/// it is declared with reports the mapping through
/// [`storage_name`](Model::storage_name).
pub trait Model: fmt::Debug + Send + Sync {
    /// Name of the record type
    fn model_name(&self) -> &str;

    /// Storage names of the fields present on this record, in order
    fn field_names(&self) -> Vec<String>;

    /// Value of a field by storage name
    fn field_value(&self, name: &str) -> Option<Value>;

    /// Storage name of a declared field, when it differs
    fn storage_name(&self, _field: &str) -> Option<String> {
        None
    }

    /// Whether a field changed since the record was loaded
    fn is_modified(&self, _name: &str) -> bool {
        false
    }
}

/// A value under test
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered sequence
    List(Vec<Value>),
    /// Insertion-ordered mapping
    Map(IndexMap<Key, Value>),
    /// Structured record
    Model(Arc<dyn Model>),
}

impl Value {
    /// Wrap a record
    pub fn model(model: impl Model + 'static) -> Self {
        Value::Model(Arc::new(model))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of integers and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&dyn Model> {
        match self {
            Value::Model(model) => Some(model.as_ref()),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Model(_) => "model",
        }
    }

    /// Length of strings (in characters), sequences, mappings and records
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.chars().count()),
            Value::List(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            Value::Model(model) => Some(model.field_names().len()),
            _ => None,
        }
    }

    /// Falsy values are null, `false`, zero and empty containers
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Model(_) => true,
        }
    }

    /// Iterate a container as `(path segment, item)` pairs
    ///
    /// Sequences yield their index, mappings their key and records their
    /// field names. Returns `None` for scalars.
    pub fn items(&self) -> Option<Vec<(String, Cow<'_, Value>)>> {
        match self {
            Value::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), Cow::Borrowed(item)))
                    .collect(),
            ),
            Value::Map(map) => Some(
                map.iter()
                    .map(|(key, item)| (key.to_string(), Cow::Borrowed(item)))
                    .collect(),
            ),
            Value::Model(model) => Some(
                model
                    .field_names()
                    .into_iter()
                    .map(|name| {
                        let item = model.field_value(&name).unwrap_or_default();
                        (name, Cow::Owned(item))
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Resolve one path segment against this value
    ///
    /// Digit-only segments index sequences; mappings are looked up by string
    /// key first and by integer key second; records by field name.
    pub fn lookup(&self, segment: &str) -> Option<Cow<'_, Value>> {
        let is_index = !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());

        match self {
            Value::List(items) => {
                if !is_index {
                    return None;
                }
                let index: usize = segment.parse().ok()?;
                items.get(index).map(Cow::Borrowed)
            }
            Value::Map(map) => map
                .get(&Key::Str(segment.to_string()))
                .or_else(|| {
                    if is_index {
                        segment.parse::<i64>().ok().and_then(|i| map.get(&Key::Int(i)))
                    } else {
                        None
                    }
                })
                .map(Cow::Borrowed),
            Value::Model(model) => model
                .field_value(segment)
                .or_else(|| {
                    model
                        .storage_name(segment)
                        .and_then(|storage| model.field_value(&storage))
                })
                .map(Cow::Owned),
            _ => None,
        }
    }

    /// Quoted rendering used for items nested in containers and value lists
    pub fn repr(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::repr).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Map(map) => {
                let rendered: Vec<String> = map
                    .iter()
                    .map(|(key, item)| format!("{}: {}", key.repr(), item.repr()))
                    .collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Value::Model(model) => {
                let rendered: Vec<String> = model
                    .field_names()
                    .into_iter()
                    .map(|name| {
                        let item = model.field_value(&name).unwrap_or_default();
                        format!("{}={}", name, item.repr())
                    })
                    .collect();
                write!(f, "{}({})", model.model_name(), rendered.join(", "))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Model(a), Value::Model(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
            Value::Model(model) => {
                let names = model.field_names();
                let mut out = serializer.serialize_map(Some(names.len()))?;
                for name in names {
                    let item = model.field_value(&name).unwrap_or_default();
                    out.serialize_entry(&name, &item)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, item)| (Key::Str(key), Value::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Arc<dyn Model>> for Value {
    fn from(model: Arc<dyn Model>) -> Self {
        Value::Model(model)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"a": [1, 2.5, "x", null], "b": true}));
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map[&Key::from("a")],
            Value::from(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Null
            ])
        );
        assert_eq!(map[&Key::from("b")], Value::Bool(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "['a', 'b']");

        let map: Value = vec![("x", Value::Int(1)), ("y", Value::from("z"))]
            .into_iter()
            .collect();
        assert_eq!(map.to_string(), "{'x': 1, 'y': 'z'}");
    }

    #[test]
    fn test_numeric_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
    }

    #[test]
    fn test_length_and_truthiness() {
        assert_eq!(Value::from("héllo").length(), Some(5));
        assert_eq!(Value::Int(3).length(), None);
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::from(vec![0]).is_truthy());
    }

    #[test]
    fn test_lookup_int_key_fallback() {
        let mut map = IndexMap::new();
        map.insert(Key::Int(1), Value::from("one"));
        let value = Value::Map(map);

        assert_eq!(value.lookup("1").unwrap().into_owned(), Value::from("one"));
        assert!(value.lookup("2").is_none());
        assert!(value.lookup("x").is_none());
    }

    #[test]
    fn test_lookup_list() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(value.lookup("1").unwrap().into_owned(), Value::from("b"));
        assert!(value.lookup("3").is_none());
        assert!(value.lookup("first").is_none());
        assert!(Value::from("scalar").lookup("0").is_none());
    }

    #[test]
    fn test_items() {
        let value = Value::from(vec!["a", "b"]);
        let items = value.items().unwrap();
        assert_eq!(items[1].0, "1");
        assert!(Value::Int(1).items().is_none());
    }
}
