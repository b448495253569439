//! Grouping strategies for export sequences
//!
//! A grouper restructures the ordered record sequence from the reader into a
//! mixed sequence of section headers and rows. Grouping is sequential: one
//! header is emitted per contiguous run of a shared key, records are never
//! reordered, merged, or dropped, and a key that reappears later gets a
//! fresh header.

use crate::error::{ExportError, ExportResult};
use crate::record::{Element, Record, Value};

/// A pluggable grouping strategy
pub trait Grouper {
    /// Restructure `records` into a grouped sequence
    ///
    /// Stripping the headers from the output must reconstruct `records`
    /// exactly, in the same order.
    fn group(&self, records: Vec<Record>) -> ExportResult<Vec<Element>>;
}

/// Groups records by the date portion of a date field
///
/// The key is the calendar date of the field value, ignoring time of day:
/// for the usual `YYYY-MM-DD HH:MM:SS` text timestamps this is the first
/// ten characters. A record missing the field fails the whole export.
pub struct DateGrouper {
    field: String,
}

impl DateGrouper {
    /// Group by the date portion of `field`
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    fn key_of(&self, record: &Record, index: usize) -> ExportResult<String> {
        let value = record
            .get(&self.field)
            .ok_or_else(|| ExportError::field_missing(&self.field, index))?;
        Ok(date_portion(value))
    }
}

impl Default for DateGrouper {
    fn default() -> Self {
        Self::new("Date")
    }
}

impl Grouper for DateGrouper {
    fn group(&self, records: Vec<Record>) -> ExportResult<Vec<Element>> {
        let mut out = Vec::with_capacity(records.len());
        let mut current: Option<String> = None;

        for (index, record) in records.into_iter().enumerate() {
            let key = self.key_of(&record, index)?;
            if current.as_deref() != Some(key.as_str()) {
                out.push(Element::Header(Value::Text(key.clone())));
                current = Some(key);
            }
            out.push(Element::Row(record));
        }

        Ok(out)
    }
}

/// Extract the date portion of a field value
///
/// Text timestamps are truncated to `YYYY-MM-DD`; non-text values fall back
/// to their plain text rendering.
fn date_portion(value: &Value) -> String {
    match value {
        Value::Text(s) if s.len() > 10 => match s.get(..10) {
            Some(date) => date.to_string(),
            None => s.clone(),
        },
        other => other.as_text(),
    }
}
