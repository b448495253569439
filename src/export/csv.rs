//! CSV format handler
//!
//! Writes one header row followed by one row per element. Fractional
//! numbers are written with a decimal comma to match the regional
//! spreadsheet convention the tool's output feeds into; group headers
//! become single-column rows. Output is UTF-8 with quoting on demand.

use std::io::Write;

use crate::error::ExportResult;
use crate::export::FormatWriter;
use crate::record::{Element, Record, Value};

/// Delimited-text format handler
pub struct CsvWriter;

impl FormatWriter for CsvWriter {
    fn write(
        &self,
        data: &[Element],
        fields: Option<&[String]>,
        out: &mut dyn Write,
    ) -> ExportResult<()> {
        let columns = resolve_columns(data, fields);

        // Group-header rows have a single column, so the writer must accept
        // records of differing lengths.
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

        writer.write_record(&columns)?;
        for element in data {
            match element {
                Element::Row(record) => {
                    let row: Vec<String> =
                        columns.iter().map(|col| cell_text(record, col)).collect();
                    writer.write_record(&row)?;
                }
                Element::Header(value) => {
                    writer.write_record([coerce(value)])?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Column names: the supplied field list, else the first record's key order
fn resolve_columns(data: &[Element], fields: Option<&[String]>) -> Vec<String> {
    match fields {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => data
            .iter()
            .find_map(|e| match e {
                Element::Row(record) => Some(record.fields()),
                Element::Header(_) => None,
            })
            .unwrap_or_default(),
    }
}

/// Render one cell; a field absent from the record writes as empty
fn cell_text(record: &Record, column: &str) -> String {
    record.get(column).map(coerce).unwrap_or_default()
}

/// Coerce a value to delimited-text form
///
/// Fractional numbers swap the decimal point for a comma; that is the only
/// transform applied to numeric values. Everything else is the plain text
/// rendering.
fn coerce(value: &Value) -> String {
    match value {
        Value::Real(_) => value.as_text().replace('.', ","),
        other => other.as_text(),
    }
}
