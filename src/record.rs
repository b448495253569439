//! Record and value types flowing through the export pipeline
//!
//! A `Record` is an insertion-ordered mapping from field name to `Value`.
//! Key order matters: it determines the column order of delimited-text
//! output when the caller does not supply an explicit field list.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single field value read from the database
///
/// Mirrors the SQLite storage classes the reader can produce. Blobs are
/// rendered as lossy UTF-8 text at read time, so they never appear here.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Render the value as plain text, with no format-specific normalization
    pub fn as_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Real(r) => format_real(*r),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Format a float the way SQLite prints it: integral values keep one
/// fractional digit ("12.0"), others use the shortest representation.
fn format_real(r: f64) -> String {
    if r.fract() == 0.0 && r.is_finite() {
        format!("{:.1}", r)
    } else {
        format!("{}", r)
    }
}

/// One row of query output: field name -> value, in query projection order
///
/// Backed by a `Vec` of pairs rather than a hash map so that iteration
/// preserves insertion order. Lookups are linear, which is fine for the
/// handful of columns a transaction row carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, preserving insertion order
    pub fn push(&mut self, field: impl Into<String>, value: Value) {
        self.entries.push((field.into(), value));
    }

    /// Look up a field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (field, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Record {
    /// Serializes as a map in insertion order
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One element of a (possibly grouped) export sequence
///
/// A plain result set is all `Row`s; a grouped sequence interleaves a
/// `Header` before each contiguous run of rows sharing the group key.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A bare group-key value acting as a section header
    Header(Value),
    /// An ordinary record
    Row(Record),
}

impl From<Record> for Element {
    fn from(record: Record) -> Self {
        Element::Row(record)
    }
}

impl Serialize for Element {
    /// Serializes untagged: headers as bare scalars, rows as objects
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Element::Header(value) => value.serialize(serializer),
            Element::Row(record) => record.serialize(serializer),
        }
    }
}
