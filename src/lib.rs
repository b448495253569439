//! ckexport - CoinKeeper database export tool
//!
//! This library exports transaction records from a CoinKeeper SQLite database
//! into delimited text files for spreadsheets, archival, and reporting. It is
//! built for a single user running it ad hoc against a local database file or
//! one mounted from a device.
//!
//! # Architecture
//!
//! The pipeline is three components composed linearly:
//!
//! - `reader`: opens the database, joins transactions to categories, and
//!   returns an ordered sequence of records
//! - `group`: optionally restructures the sequence with section headers
//!   (one per contiguous run of a shared key, date by default)
//! - `export`: serializes the sequence to a file, with the format chosen by
//!   the target path's extension
//!
//! Supporting modules:
//!
//! - `record`: the value and record types flowing through the pipeline
//! - `device`: mounting a device filesystem to reach the database file
//! - `error`: custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use ckexport::export::Exporter;
//! use ckexport::reader::TransactionReader;
//! use ckexport::record::Element;
//!
//! let reader = TransactionReader::connect("CoinKeeper2.db3")?;
//! let records = reader.fetch(None, "Date")?;
//! let data: Vec<Element> = records.into_iter().map(Element::Row).collect();
//! Exporter::default().export(&data, "transactions.csv", None)?;
//! ```

pub mod cli;
pub mod device;
pub mod error;
pub mod export;
pub mod group;
pub mod reader;
pub mod record;

pub use error::{ExportError, ExportResult};
pub use record::{Element, Record, Value};
