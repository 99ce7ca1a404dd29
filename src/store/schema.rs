//! Schema validation for uploaded stores.
//!
//! Runs before any settings logic: the store must expose exactly the
//! `LocalStorage(key, value)` shape the game client writes. Checks
//! short-circuit on the first failure, and any error while introspecting
//! (the file opened but is not usable as a database) collapses into
//! [`SchemaError::NotAValidStore`] instead of leaking a raw database
//! error.

use rusqlite::types::Value as SqlValue;

use crate::store::Store;

/// Why an opened store cannot be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing LocalStorage table")]
    MissingTable,

    #[error("Invalid table schema: missing \"key\" column")]
    MissingKeyColumn,

    #[error("Invalid table schema: missing \"value\" column")]
    MissingValueColumn,

    #[error("Invalid table schema: missing both \"key\" and \"value\" columns")]
    MissingBothColumns,

    #[error("Error validating database. Is it actually a LocalStorage DB?")]
    NotAValidStore,
}

/// Confirm the store carries the expected single-table shape.
///
/// The table name match is case-sensitive (`LocalStorage` exactly); the
/// column matches are case-insensitive, since client versions differ in
/// how they case `Key`/`Value`.
pub fn validate(store: &Store) -> Result<(), SchemaError> {
    let tables = store
        .read_rows(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'LocalStorage'",
            [],
        )
        .map_err(|_| SchemaError::NotAValidStore)?;
    if tables.is_empty() {
        return Err(SchemaError::MissingTable);
    }

    let columns = store
        .read_rows("PRAGMA table_info(LocalStorage)", [])
        .map_err(|_| SchemaError::NotAValidStore)?;

    let mut has_key = false;
    let mut has_value = false;
    for column in &columns {
        // table_info rows are (cid, name, type, notnull, dflt_value, pk)
        if let Some(SqlValue::Text(name)) = column.get(1) {
            if name.eq_ignore_ascii_case("key") {
                has_key = true;
            }
            if name.eq_ignore_ascii_case("value") {
                has_value = true;
            }
        }
    }

    match (has_key, has_value) {
        (true, true) => Ok(()),
        (false, false) => Err(SchemaError::MissingBothColumns),
        (false, true) => Err(SchemaError::MissingKeyColumn),
        (true, false) => Err(SchemaError::MissingValueColumn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    fn validate_bytes(bytes: &[u8]) -> Result<(), SchemaError> {
        let store = Store::open(bytes).unwrap();
        validate(&store)
    }

    #[test]
    fn test_well_formed_store_passes() {
        assert_eq!(validate_bytes(&test_utils::default_store()), Ok(()));
    }

    #[test]
    fn test_missing_table() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE Other (key TEXT, value TEXT)");
        assert_eq!(validate_bytes(&bytes), Err(SchemaError::MissingTable));
    }

    #[test]
    fn test_table_name_is_case_sensitive() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE localstorage (key TEXT, value TEXT)");
        assert_eq!(validate_bytes(&bytes), Err(SchemaError::MissingTable));
    }

    #[test]
    fn test_missing_key_column() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE LocalStorage (id TEXT, value TEXT)");
        assert_eq!(validate_bytes(&bytes), Err(SchemaError::MissingKeyColumn));
    }

    #[test]
    fn test_missing_value_column() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE LocalStorage (key TEXT, data TEXT)");
        assert_eq!(validate_bytes(&bytes), Err(SchemaError::MissingValueColumn));
    }

    #[test]
    fn test_missing_both_columns() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE LocalStorage (id TEXT, data TEXT)");
        assert_eq!(validate_bytes(&bytes), Err(SchemaError::MissingBothColumns));
    }

    #[test]
    fn test_column_match_is_case_insensitive() {
        let bytes =
            test_utils::store_bytes_with_schema("CREATE TABLE LocalStorage (KEY TEXT, VALUE TEXT)");
        assert_eq!(validate_bytes(&bytes), Ok(()));
    }
}
