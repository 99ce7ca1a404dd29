//! Editing session: owns the loaded snapshot and the pending delta.
//!
//! The session is the collaborator interface the (out-of-scope) UI layer
//! talks to: load bytes, change values, download either artifact. It
//! holds the only mutable settings state; entries and pending changes
//! move together or not at all.

use crate::export;
use crate::settings::{self, Entry, PendingChanges, Value};
use crate::store::{Store, schema};
use crate::{Error, Result};

/// Lifecycle of one editing session.
///
/// `Exported` is not terminal: further edits and re-exports remain
/// valid, flipping back to `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
    Editing,
    Exported,
}

/// A single-file editing session.
pub struct Session {
    state: SessionState,
    original_bytes: Vec<u8>,
    entries: Vec<Entry>,
    pending: PendingChanges,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Empty,
            original_bytes: Vec::new(),
            entries: Vec::new(),
            pending: PendingChanges::new(),
        }
    }

    /// Open, validate and extract an uploaded store.
    ///
    /// Fails without touching the session state, so a new buffer can be
    /// retried after a bad upload.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<()> {
        let store = Store::open(&bytes)?;
        schema::validate(&store)?;
        let entries = settings::extract(&store)?;

        self.original_bytes = bytes;
        self.entries = entries;
        self.pending = PendingChanges::new();
        self.state = SessionState::Loaded;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn pending(&self) -> &PendingChanges {
        &self.pending
    }

    /// Bytes exactly as uploaded, for the backup artifact.
    pub fn original_bytes(&self) -> &[u8] {
        &self.original_bytes
    }

    /// Apply one user edit plus everything it cascades to.
    ///
    /// The resolved change set lands in the display entries and the
    /// pending delta in the same call; there is no partially applied
    /// state. Cascade targets missing from the store are dropped so
    /// pending keys stay a subset of the entry keys.
    pub fn change_value(&mut self, key: &str, value: Value) -> Result<()> {
        if self.state == SessionState::Empty {
            return Err(Error::NoStoreLoaded);
        }
        if !self.entries.iter().any(|e| e.key == key) {
            return Err(Error::UnknownKey(key.to_string()));
        }
        settings::validate_assignment(key, &value)?;

        let mut changes = settings::resolver::resolve(key, value, &self.entries);
        changes.retain(|k, _| self.entries.iter().any(|e| e.key == *k));

        for entry in &mut self.entries {
            if let Some(new_value) = changes.get(&entry.key) {
                entry.current_value = new_value.clone();
            }
        }
        self.pending.extend(changes);
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Build the modified artifact from the original bytes plus the
    /// accumulated delta.
    pub fn export_modified(&mut self) -> Result<Vec<u8>> {
        if self.state == SessionState::Empty {
            return Err(Error::NoStoreLoaded);
        }
        let bytes = export::export_patched(&self.original_bytes, &self.pending)?;
        self.state = SessionState::Exported;
        Ok(bytes)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
