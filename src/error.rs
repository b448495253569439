//! Custom error types for ckexport
//!
//! This module defines the error hierarchy for the export pipeline using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// The data source does not exist or is not a valid database
    #[error("Connection error: {0}")]
    Connection(String),

    /// A requested field or order-by name is not part of the joined schema
    #[error("Query error: {0}")]
    Query(String),

    /// The grouping field is absent from a record
    #[error("Field '{field}' missing from record {index}")]
    FieldMissing { field: String, index: usize },

    /// No format handler is registered for the target extension
    #[error("No exporter registered for format '{0}'")]
    UnsupportedFormat(String),

    /// I/O failure during serialization
    #[error("Write error: {0}")]
    Write(String),

    /// Device mount/unmount failure
    #[error("Mount error: {0}")]
    Mount(String),

    /// File I/O errors outside of serialization
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExportError {
    /// Create a "field missing" error for a record at the given position
    pub fn field_missing(field: impl Into<String>, index: usize) -> Self {
        Self::FieldMissing {
            field: field.into(),
            index,
        }
    }

    /// Check if this is an unsupported-format error
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for ExportError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Write(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Write(err.to_string())
    }
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;
