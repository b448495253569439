//! Export module for ckexport
//!
//! Serializes a (possibly grouped) sequence of records to a file, in a
//! format selected by the target path's extension:
//! - CSV: delimited text for spreadsheets (regional decimal-comma convention)
//! - JSON: machine-readable array of objects
//!
//! Formats are registered in an explicit table keyed by extension tag, so an
//! unknown extension fails with a proper error instead of a lookup failure.

pub mod csv;
pub mod json;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::record::Element;

/// A format handler that serializes an export sequence to a writer
pub trait FormatWriter {
    /// Serialize `data` to `out`
    ///
    /// `fields` constrains the column set and order; when `None`, columns
    /// derive from the first record's key order.
    fn write(
        &self,
        data: &[Element],
        fields: Option<&[String]>,
        out: &mut dyn Write,
    ) -> ExportResult<()>;
}

/// Dispatches exports to format handlers by target file extension
///
/// The extension is matched case-insensitively with the leading dot
/// stripped. `Exporter::default()` registers the built-in `csv` and `json`
/// handlers; additional formats can be added with [`Exporter::register`].
pub struct Exporter {
    handlers: HashMap<String, Box<dyn FormatWriter>>,
}

impl Exporter {
    /// Create an exporter with no registered formats
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a format handler under an extension tag
    pub fn register(&mut self, tag: impl Into<String>, writer: Box<dyn FormatWriter>) {
        self.handlers.insert(tag.into().to_lowercase(), writer);
    }

    /// Export `data` to the file at `path`
    ///
    /// The handler is resolved first, so an unregistered extension fails
    /// even for empty data. With a resolved handler, empty `data` is a
    /// no-op: no file is created and the handler does not run. The handler
    /// serializes into an in-memory buffer, so a handler failure leaves no
    /// partial file behind.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] if no handler is
    /// registered for the path's extension, or [`ExportError::Write`] if
    /// serialization or the final file write fails.
    pub fn export(
        &self,
        data: &[Element],
        path: impl AsRef<Path>,
        fields: Option<&[String]>,
    ) -> ExportResult<()> {
        let path = path.as_ref();
        let tag = extension_tag(path);
        let handler = self
            .handlers
            .get(&tag)
            .ok_or(ExportError::UnsupportedFormat(tag))?;

        if data.is_empty() {
            return Ok(());
        }

        let mut buffer = Vec::new();
        handler.write(data, fields, &mut buffer)?;

        std::fs::write(path, buffer)
            .map_err(|e| ExportError::Write(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        let mut exporter = Self::empty();
        exporter.register("csv", Box::new(CsvWriter));
        exporter.register("json", Box::new(JsonWriter));
        exporter
    }
}

/// Lower-cased extension of `path` with the leading dot stripped
fn extension_tag(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, Value};
    use tempfile::TempDir;

    fn sample_data() -> Vec<Element> {
        let mut r = Record::new();
        r.push("Name", Value::Text("Coffee".into()));
        r.push("DefaultAmount", Value::Real(3.5));
        vec![Element::Row(r)]
    }

    #[test]
    fn test_empty_data_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        Exporter::default().export(&[], &path, None).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_data_still_checks_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        let err = Exporter::default().export(&[], &path, None).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref tag) if tag == "xlsx"));
        assert!(!path.exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        let err = Exporter::default()
            .export(&sample_data(), &path, None)
            .unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref tag) if tag == "xlsx"));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out");

        let err = Exporter::default()
            .export(&sample_data(), &path, None)
            .unwrap_err();
        assert!(err.is_unsupported_format());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.CSV");

        Exporter::default()
            .export(&sample_data(), &path, None)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_register_custom_format() {
        struct NullWriter;
        impl FormatWriter for NullWriter {
            fn write(
                &self,
                _data: &[Element],
                _fields: Option<&[String]>,
                out: &mut dyn std::io::Write,
            ) -> ExportResult<()> {
                out.write_all(b"ok").map_err(ExportError::from)
            }
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.null");

        let mut exporter = Exporter::default();
        exporter.register("null", Box::new(NullWriter));
        exporter.export(&sample_data(), &path, None).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ok");
    }

    #[test]
    fn test_failed_handler_leaves_no_file() {
        struct FailingWriter;
        impl FormatWriter for FailingWriter {
            fn write(
                &self,
                _data: &[Element],
                _fields: Option<&[String]>,
                _out: &mut dyn std::io::Write,
            ) -> ExportResult<()> {
                Err(ExportError::Write("boom".into()))
            }
        }

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.bad");

        let mut exporter = Exporter::empty();
        exporter.register("bad", Box::new(FailingWriter));
        let err = exporter.export(&sample_data(), &path, None).unwrap_err();

        assert!(matches!(err, ExportError::Write(_)));
        assert!(!path.exists());
    }
}
