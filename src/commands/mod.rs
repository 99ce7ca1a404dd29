//! Command implementations for the wuwaconf CLI.
//!
//! Each command loads a fresh [`Session`] from the file argument, drives
//! the engine, and returns a typed result that renders as JSON (default)
//! or human-readable text.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::session::Session;
use crate::settings::{self, CUSTOM_FRAME_RATE, Entry, PendingChanges, Value};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Result of `wuwaconf check`.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub file: String,
    pub valid: bool,
    pub settings: usize,
}

impl Output for CheckResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!("{}: valid LocalStorage database ({} settings)", self.file, self.settings)
    }
}

/// Result of `wuwaconf show`.
#[derive(Debug, Serialize)]
pub struct ShowResult {
    pub file: String,
    pub entries: Vec<Entry>,
}

impl Output for ShowResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("{:<28} {}\n", entry.key, entry.current_value));
        }
        out.pop();
        out
    }
}

/// Result of `wuwaconf set`.
#[derive(Debug, Serialize)]
pub struct SetResult {
    pub file: String,
    pub out: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    /// Every change written, including cascaded ones.
    pub changes: PendingChanges,
    pub frame_rate_enforced: bool,
}

impl Output for SetResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut out = format!("Wrote {}\n", self.out);
        if let Some(backup) = &self.backup {
            out.push_str(&format!("Backup {}\n", backup));
        }
        out.push_str("Applied changes:\n");
        for (key, value) in &self.changes {
            out.push_str(&format!("  {} = {}\n", key, value));
        }
        if self.frame_rate_enforced {
            out.push_str("Installed the 120 FPS enforcement trigger\n");
        }
        out.pop();
        out
    }
}

/// Validate a settings database without changing anything.
pub fn check(path: &Path) -> Result<CheckResult> {
    let session = load_session(path)?;
    Ok(CheckResult {
        file: path.display().to_string(),
        valid: true,
        settings: session.entries().len(),
    })
}

/// List the entries of a settings database.
pub fn show(path: &Path, known_only: bool) -> Result<ShowResult> {
    let session = load_session(path)?;
    let entries = session
        .entries()
        .iter()
        .filter(|e| !known_only || settings::is_known(&e.key))
        .cloned()
        .collect();
    Ok(ShowResult {
        file: path.display().to_string(),
        entries,
    })
}

/// Apply assignments through the resolver and write the patched copy
/// (plus an optional backup of the untouched input).
pub fn set(
    path: &Path,
    assignments: &[String],
    out: Option<PathBuf>,
    backup: Option<PathBuf>,
) -> Result<SetResult> {
    let mut session = load_session(path)?;

    for assignment in assignments {
        let (key, raw) = parse_assignment(assignment)?;
        session.change_value(key, Value::parse(raw))?;
    }

    let modified = session.export_modified()?;
    let out_path = out.unwrap_or_else(|| default_out_path(path));
    fs::write(&out_path, &modified)?;

    let backup_path = match backup {
        Some(p) => {
            fs::write(&p, session.original_bytes())?;
            Some(p)
        }
        None => None,
    };

    let frame_rate_enforced =
        session.pending().get(CUSTOM_FRAME_RATE).and_then(Value::as_int) == Some(120);

    Ok(SetResult {
        file: path.display().to_string(),
        out: out_path.display().to_string(),
        backup: backup_path.map(|p| p.display().to_string()),
        changes: session.pending().clone(),
        frame_rate_enforced,
    })
}

fn load_session(path: &Path) -> Result<Session> {
    let bytes = fs::read(path)?;
    let mut session = Session::new();
    session.load(bytes)?;
    Ok(session)
}

fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(Error::InvalidValue(format!(
            "expected KEY=VALUE, got '{raw}'"
        ))),
    }
}

fn default_out_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("LocalStorage");
    input.with_file_name(format!("{stem}_Modified.db"))
}
