//! JSON format handler
//!
//! Writes the export sequence as a JSON array: records become objects with
//! their field order preserved, group headers become bare scalars. Numeric
//! values stay numeric; the decimal-comma transform is a delimited-text
//! convention and does not apply here.

use std::io::Write;

use crate::error::ExportResult;
use crate::export::FormatWriter;
use crate::record::{Element, Record, Value};

/// JSON format handler
pub struct JsonWriter;

impl FormatWriter for JsonWriter {
    fn write(
        &self,
        data: &[Element],
        fields: Option<&[String]>,
        out: &mut dyn Write,
    ) -> ExportResult<()> {
        match fields {
            Some(list) if !list.is_empty() => {
                let projected: Vec<Element> = data
                    .iter()
                    .map(|element| match element {
                        Element::Row(record) => Element::Row(project(record, list)),
                        header => header.clone(),
                    })
                    .collect();
                serde_json::to_writer_pretty(&mut *out, &projected)?;
            }
            _ => serde_json::to_writer_pretty(&mut *out, data)?,
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Restrict a record to the selected fields, in selection order
///
/// A field the record lacks serializes as null.
fn project(record: &Record, fields: &[String]) -> Record {
    fields
        .iter()
        .map(|field| {
            let value = record.get(field).cloned().unwrap_or(Value::Null);
            (field.clone(), value)
        })
        .collect()
}
