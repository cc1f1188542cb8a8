//! The property list value model.
//!
//! A [`Value`] is a self-describing variant covering the universe of
//! storable plist values. Strings carry an optional *annotation*: a
//! display-only comment rendered as `/* ... */` in output, ignored by
//! equality and by every semantic operation.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A property list value.
#[derive(Debug, Clone)]
pub enum Value {
    Dictionary(Dictionary),
    Array(Array),
    String(Str),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Data(Vec<u8>),
    Date(DateTime<Utc>),
    /// A keyed-archive object reference marker.
    Uid(u64),
}

impl Value {
    /// Build a string value without an annotation.
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(Str::new(value))
    }

    /// Build a string value carrying a display annotation.
    pub fn annotated(value: impl Into<String>, annotation: impl Into<String>) -> Self {
        Value::String(Str::annotated(value, annotation))
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.value()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Integer interpretation accepting compatible representations:
    /// integers, truncated reals, parseable strings, and booleans.
    pub fn coerce_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Real(r) => Some(*r as i64),
            Value::Boolean(b) => Some(i64::from(*b)),
            Value::String(s) => s.value().trim().parse().ok(),
            _ => None,
        }
    }

    /// Real interpretation accepting integers and parseable strings.
    pub fn coerce_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            Value::Integer(n) => Some(*n as f64),
            Value::String(s) => s.value().trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean interpretation accepting integers and the common string
    /// spellings (`YES`/`NO`, `true`/`false`, `1`/`0`).
    pub fn coerce_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Integer(n) => Some(*n != 0),
            Value::String(s) => match s.value().trim() {
                "YES" | "yes" | "true" | "1" => Some(true),
                "NO" | "no" | "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// The display annotation, if this value is a string that carries one.
    pub fn annotation(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.annotation(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Dictionary(a), Value::Dictionary(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Uid(a), Value::Uid(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// A string value plus its optional display annotation.
///
/// The annotation never participates in equality; two strings with the
/// same content compare equal regardless of what comment either would
/// print with.
#[derive(Debug, Clone, Default)]
pub struct Str {
    value: String,
    annotation: Option<String>,
}

impl Str {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            annotation: None,
        }
    }

    pub fn annotated(value: impl Into<String>, annotation: impl Into<String>) -> Self {
        let annotation = annotation.into();
        Self {
            value: value.into(),
            annotation: (!annotation.is_empty()).then_some(annotation),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn set_annotation(&mut self, annotation: impl Into<String>) {
        let annotation = annotation.into();
        self.annotation = (!annotation.is_empty()).then_some(annotation);
    }
}

impl PartialEq for Str {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Str {}

/// An insertion-ordered string-to-value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Value>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace an entry, keeping the original insertion position
    /// on replacement.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Exact-type dictionary lookup.
    pub fn get_dictionary(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Value::as_dictionary)
    }

    /// Exact-type array lookup.
    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Value::as_array)
    }

    /// Exact-type string lookup.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Coercing integer lookup.
    pub fn coerce_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::coerce_integer)
    }
}

impl FromIterator<(String, Value)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Collect the string elements, skipping values of other kinds.
    pub fn strings(&self) -> Vec<String> {
        self.values
            .iter()
            .filter_map(|value| value.as_str().map(str::to_owned))
            .collect()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
