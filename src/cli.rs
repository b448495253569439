//! Export orchestration for the CLI
//!
//! Bridges the clap argument parsing in `main` with the pipeline: connect,
//! fetch once, optionally group, then export the same in-memory dataset to
//! every requested target. The first failing target aborts the run; earlier
//! targets keep the files they already wrote.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::ExportResult;
use crate::export::Exporter;
use crate::group::{DateGrouper, Grouper};
use crate::reader::TransactionReader;
use crate::record::Element;

/// Options controlling one export run
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Field selection; `None` means the default field set
    pub fields: Option<Vec<String>>,
    /// Order-by key for the query
    pub order_by: String,
    /// Insert a date section header before each contiguous run of dates
    pub group_by_date: bool,
    /// Output targets; empty means the default dated CSV file
    pub targets: Vec<PathBuf>,
}

/// Default output target: today's date plus the CSV extension
pub fn default_target() -> PathBuf {
    PathBuf::from(Local::now().format("%Y-%m-%d.csv").to_string())
}

/// Run one export: fetch, optionally group, write every target
pub fn handle_export(db_path: impl AsRef<Path>, options: &ExportOptions) -> ExportResult<()> {
    let reader = TransactionReader::connect(db_path)?;
    let records = reader.fetch(options.fields.as_deref(), &options.order_by)?;
    println!("Fetched {} transactions", records.len());

    let data: Vec<Element> = if options.group_by_date {
        DateGrouper::default().group(records)?
    } else {
        records.into_iter().map(Element::Row).collect()
    };

    let targets: Vec<PathBuf> = if options.targets.is_empty() {
        vec![default_target()]
    } else {
        options.targets.clone()
    };

    let exporter = Exporter::default();
    for target in &targets {
        exporter.export(&data, target, options.fields.as_deref())?;
        println!("Exported to: {}", target.display());
    }

    Ok(())
}
