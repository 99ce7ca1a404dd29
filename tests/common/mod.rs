//! Common test utilities for wuwaconf integration tests.
//!
//! Provides `TestEnv`, a temp directory holding fixture databases, plus
//! helpers to build `LocalStorage.db` files and read values back out of
//! exported copies.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rusqlite::{Connection, params};
pub use tempfile::TempDir;

/// Rows a typical client install carries.
pub const DEFAULT_ROWS: &[(&str, &str)] = &[
    ("CustomFrameRate", "60"),
    ("RayTracing", "0"),
    ("RayTracedReflection", "0"),
    ("RayTracedGI", "0"),
    ("XessEnable", "1"),
    ("XessQuality", "1"),
    ("Brightness", "50"),
];

pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the wuwaconf binary, running in the temp dir.
    pub fn wuwaconf(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_wuwaconf"));
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Write a LocalStorage.db fixture with the typical settings rows.
    pub fn write_default_db(&self) -> PathBuf {
        self.write_db(DEFAULT_ROWS)
    }

    /// Write a LocalStorage.db fixture with the given rows.
    pub fn write_db(&self, rows: &[(&str, &str)]) -> PathBuf {
        let path = self.dir.path().join("LocalStorage.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE LocalStorage (key TEXT PRIMARY KEY, value TEXT)")
            .unwrap();
        for (key, value) in rows {
            conn.execute(
                "INSERT INTO LocalStorage (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .unwrap();
        }
        path
    }

    /// Write a database with a caller-supplied schema batch.
    pub fn write_db_with_schema(&self, schema: &str) -> PathBuf {
        let path = self.dir.path().join("LocalStorage.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(schema).unwrap();
        path
    }

    /// Write arbitrary bytes as a (probably invalid) database file.
    pub fn write_raw(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one value out of a database file.
pub fn read_value(db: &Path, key: &str) -> Option<String> {
    let conn = Connection::open(db).unwrap();
    conn.query_row(
        "SELECT Value FROM LocalStorage WHERE Key = ?1",
        params![key],
        |row| row.get(0),
    )
    .ok()
}

/// Count triggers with the given name in a database file.
pub fn trigger_count(db: &Path, name: &str) -> i64 {
    let conn = Connection::open(db).unwrap();
    conn.query_row(
        "SELECT count(*) FROM sqlite_master WHERE type = 'trigger' AND name = ?1",
        params![name],
        |row| row.get(0),
    )
    .unwrap()
}
