//! Binary store adapter over the LocalStorage database format.
//!
//! The adapter knows nothing about settings semantics; it opens a byte
//! buffer as a relational store and exposes parameterized read/write
//! primitives plus byte serialization. Higher layers (validator,
//! extractor, exporter) build on these.

pub mod schema;

use std::io::Write;

use rusqlite::{Connection, Params};
use rusqlite::types::Value as SqlValue;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// An opened settings store.
///
/// The caller's byte buffer is staged into a private temp file so SQLite
/// can open it; the handle owns both the connection and the backing file
/// for its lifetime. Dropping the store removes the backing file.
pub struct Store {
    conn: Connection,
    file: NamedTempFile,
}

impl Store {
    /// Open a byte buffer as a settings store.
    ///
    /// Fails with [`Error::Open`] when the buffer is not a well-formed
    /// SQLite file (corrupt header, truncated tail).
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;

        let conn = Connection::open(file.path()).map_err(|e| Error::Open(e.to_string()))?;

        // SQLite opens lazily; force a header read so corrupt input fails
        // here instead of on the first real query.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| Error::Open(e.to_string()))?;

        Ok(Self { conn, file })
    }

    /// Run a read-only query and collect all rows in storage order.
    pub fn read_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Vec<SqlValue>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_count = stmt.column_count();
        let rows = stmt.query_map(params, |row| {
            let mut cols = Vec::with_capacity(column_count);
            for i in 0..column_count {
                cols.push(row.get::<_, SqlValue>(i)?);
            }
            Ok(cols)
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Execute a single parameterized mutation. Returns the affected row
    /// count. Values are always bound, never interpolated; keys and
    /// values may contain arbitrary characters.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Execute a batch of parameterless statements (DDL, triggers).
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        Ok(self.conn.execute_batch(sql)?)
    }

    /// Serialize the current store state to a byte buffer.
    ///
    /// The connection runs in autocommit mode, so every prior `execute`
    /// is already durable in the backing file.
    pub fn export_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(self.file.path())?)
    }
}
