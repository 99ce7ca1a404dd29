//! Building the modified database artifact.
//!
//! Every export patches a fresh copy opened from the original bytes; the
//! live session store is never mutated, so the original stays
//! independently downloadable and repeated exports are byte-identical.

use rusqlite::params;

use crate::settings::{CUSTOM_FRAME_RATE, MENU_DATA, PLAY_MENU_INFO, PendingChanges};
use crate::store::Store;
use crate::{Error, Result};

/// Name of the trigger injected into exported copies when the 120 FPS
/// unlock is active. Only exported copies carry it.
pub const ENFORCEMENT_TRIGGER: &str = "prevent_custom_frame_rate_update";

const CREATE_ENFORCEMENT_TRIGGER: &str = r#"
CREATE TRIGGER prevent_custom_frame_rate_update
AFTER UPDATE OF Value ON LocalStorage
WHEN NEW.Key = 'CustomFrameRate' AND NEW.Value <> '120'
BEGIN
    UPDATE LocalStorage SET Value = '120' WHERE Key = 'CustomFrameRate';
END;
"#;

/// Menu state blobs the client expects once the frame rate cap is
/// lifted. Opaque to the editor; written verbatim, never read back.
pub const MENU_DATA_PAYLOAD: &str =
    r#"{"___MetaType___":"___Map___","Content":[[69,120],[81,0],[92,1]]}"#;
pub const PLAY_MENU_INFO_PAYLOAD: &str =
    r#"{"___MetaType___":"___Map___","Content":[[1,120],[2,1]]}"#;

/// Replay the pending delta onto a fresh copy of the original bytes and
/// serialize the result.
///
/// Any failure along the way (bad bytes, malformed pending value)
/// surfaces as [`Error::Export`] with the underlying message; the caller
/// still holds the original bytes.
pub fn export_patched(original_bytes: &[u8], pending: &PendingChanges) -> Result<Vec<u8>> {
    apply(original_bytes, pending).map_err(|e| Error::Export(e.to_string()))
}

fn apply(original_bytes: &[u8], pending: &PendingChanges) -> Result<Vec<u8>> {
    let store = Store::open(original_bytes)?;

    for (key, value) in pending {
        store.execute(
            "UPDATE LocalStorage SET Value = ?1 WHERE Key = ?2",
            params![value.to_string(), key],
        )?;
    }

    if pending.get(CUSTOM_FRAME_RATE).and_then(|v| v.as_int()) == Some(120) {
        install_frame_rate_enforcement(&store)?;
    }

    store.export_bytes()
}

/// Pin `CustomFrameRate` at 120 inside the exported copy and write the
/// menu state rows that go with the unlocked frame rate.
fn install_frame_rate_enforcement(store: &Store) -> Result<()> {
    store.execute_batch(&format!("DROP TRIGGER IF EXISTS {ENFORCEMENT_TRIGGER};"))?;
    store.execute_batch(CREATE_ENFORCEMENT_TRIGGER)?;

    upsert(store, MENU_DATA, MENU_DATA_PAYLOAD)?;
    upsert(store, PLAY_MENU_INFO, PLAY_MENU_INFO_PAYLOAD)?;
    Ok(())
}

/// Update-or-insert via read-before-write. The store has no concurrent
/// writers, so the probe and the write form one logical unit.
fn upsert(store: &Store, key: &str, value: &str) -> Result<()> {
    let existing = store.read_rows(
        "SELECT Key FROM LocalStorage WHERE Key = ?1",
        params![key],
    )?;
    if existing.is_empty() {
        store.execute(
            "INSERT INTO LocalStorage (Key, Value) VALUES (?1, ?2)",
            params![key, value],
        )?;
    } else {
        store.execute(
            "UPDATE LocalStorage SET Value = ?1 WHERE Key = ?2",
            params![value, key],
        )?;
    }
    Ok(())
}
