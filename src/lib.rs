//! wuwaconf - a settings patch engine for the Wuthering Waves
//! `LocalStorage` database.
//!
//! The game client reads its graphics settings from a single-table SQLite
//! file at startup. This library opens that file from a byte buffer,
//! validates its schema, extracts the settings into a typed model, applies
//! constrained interdependent edits (turning ray tracing off or on
//! cascades into its dependent settings), and serializes a patched copy
//! while leaving the original bytes untouched. The `wuwaconf` binary is a
//! thin CLI over [`session::Session`].

pub mod cli;
pub mod commands;
pub mod export;
pub mod session;
pub mod settings;
pub mod store;


/// Library-level error type for wuwaconf operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open database: {0}")]
    Open(String),

    #[error(transparent)]
    Schema(#[from] store::schema::SchemaError),

    #[error("export failed: {0}")]
    Export(String),

    #[error("no database loaded")]
    NoStoreLoaded,

    #[error("unknown setting: {0}")]
    UnknownKey(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for wuwaconf operations.
pub type Result<T> = std::result::Result<T, Error>;
