use std::path::Path;

use polars::prelude::DataFrame;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::polars_utils::{format_numeric, text_frame};

/// Read-only access to a relational source database.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self { conn })
    }

    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Read every row of `table` as text cells.
    pub fn read_table(&self, table: &str) -> Result<DataFrame> {
        let available = self.list_tables()?;
        if !available.iter().any(|name| name == table) {
            return Err(IngestError::TableNotFound {
                table: table.to_string(),
                available,
            });
        }
        let query = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));
        let mut stmt = self.conn.prepare(&query)?;
        let column_count = stmt.column_count();
        let headers: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        let mut result_rows = stmt.query([])?;
        while let Some(row) = result_rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                let value = match row.get_ref(idx)? {
                    ValueRef::Null => None,
                    ValueRef::Integer(n) => Some(n.to_string()),
                    ValueRef::Real(f) => Some(format_numeric(f)),
                    ValueRef::Text(bytes) => {
                        let text = String::from_utf8_lossy(bytes);
                        let trimmed = text.trim();
                        (!trimmed.is_empty()).then(|| trimmed.to_string())
                    }
                    ValueRef::Blob(_) => None,
                };
                values.push(value);
            }
            rows.push(values);
        }
        debug!(table, rows = rows.len(), "read sqlite table");
        text_frame(&headers, &rows)
    }
}
