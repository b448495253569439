//! Repository reader for the CoinKeeper database
//!
//! Opens the SQLite database read-only, joins the `Transaction` table to
//! `Category`, filters out soft-deleted and virtual rows, and materializes
//! the result as ordered [`Record`]s.
//!
//! Field and order-by names are validated against the joined schema before
//! they are interpolated into SQL, so a bad name fails with a query error
//! instead of reaching the database as injected text.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use crate::error::{ExportError, ExportResult};
use crate::record::{Record, Value};

/// Fields exported when the caller does not supply a selection
pub const DEFAULT_FIELDS: [&str; 5] = ["Name", "Note", "DefaultAmount", "Icon", "Date"];

/// Reads transaction records from a CoinKeeper SQLite database
///
/// The reader owns its connection for the duration of one export.
/// [`TransactionReader::fetch`] consumes the reader, so the connection is
/// released as soon as the result set has been materialized, whether the
/// fetch succeeded or not.
#[derive(Debug)]
pub struct TransactionReader {
    conn: Connection,
}

impl TransactionReader {
    /// Open a connection to the database at `path`
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Connection`] if the path does not exist or the
    /// file is not a valid SQLite database.
    pub fn connect(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExportError::Connection(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| ExportError::Connection(format!("{}: {}", path.display(), e)))?;

        // Opening lazily succeeds on arbitrary files; a trivial query forces
        // SQLite to actually read the header.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| ExportError::Connection(format!("not a valid database: {}", e)))?;

        Ok(Self { conn })
    }

    /// Fetch transaction records joined to their destination category
    ///
    /// Selects `fields` (or [`DEFAULT_FIELDS`] when `None`), skips rows
    /// flagged deleted or virtual, and orders ascending by `order_by`.
    /// The returned records carry their fields in the requested order.
    ///
    /// Consumes the reader: the connection is dropped when this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Query`] if any requested field or the order-by
    /// key is not a column of the joined schema.
    pub fn fetch(self, fields: Option<&[String]>, order_by: &str) -> ExportResult<Vec<Record>> {
        let columns = self.joined_columns()?;

        let selected: Vec<String> = match fields {
            Some(list) if !list.is_empty() => list.to_vec(),
            _ => DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        };

        for field in &selected {
            validate_identifier(field, &columns)?;
        }
        validate_identifier(order_by, &columns)?;

        let projection = selected
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            r#"
            SELECT {projection}
            FROM (
                "Transaction" AS t
                LEFT JOIN Category AS c ON t.DestinationUid = c.Uid
            ) AS JoinedTable
            WHERE JoinedTable.Deleted = 0 AND JoinedTable.Virtual = 0
            ORDER BY "{order_by}"
            "#
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            let mut record = Record::new();
            for (idx, field) in selected.iter().enumerate() {
                record.push(field.clone(), map_value(row.get_ref(idx)?));
            }
            Ok(record)
        })?;

        let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Column names of the Transaction/Category join, used for validation
    ///
    /// `SELECT *` over the join trips on the shared `Uid` column, so the
    /// two tables are enumerated separately.
    fn joined_columns(&self) -> ExportResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                r#"
                SELECT name FROM pragma_table_info('Transaction')
                UNION ALL
                SELECT name FROM pragma_table_info('Category')
                "#,
            )
            .map_err(|e| ExportError::Query(format!("cannot inspect schema: {}", e)))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| ExportError::Query(format!("cannot inspect schema: {}", e)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(ExportError::Query(
                "database has no Transaction/Category tables".into(),
            ));
        }
        Ok(columns)
    }
}

/// Reject field/order-by names that are not columns of the joined schema
///
/// SQLite identifiers are case-insensitive, so the comparison is too.
fn validate_identifier(name: &str, columns: &[String]) -> ExportResult<()> {
    if columns.iter().any(|c| c.eq_ignore_ascii_case(name)) {
        Ok(())
    } else {
        Err(ExportError::Query(format!(
            "unknown field '{}' (available: {})",
            name,
            columns.join(", ")
        )))
    }
}

/// Map a SQLite cell to a pipeline [`Value`]
///
/// Blobs are rendered as lossy UTF-8 text so downstream formats only ever
/// see the four storage classes of [`Value`].
fn map_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
    }
}
