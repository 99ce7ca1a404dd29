//! Settings vocabulary and the typed key-value model.
//!
//! The store persists everything as text. Numeric-looking strings are
//! promoted at load time so range checks and cascade comparisons see
//! numbers; the persisted form is always the display string again. The
//! vocabulary here is fixed - the client owns the full key set, but only
//! these keys carry editing rules.

pub mod resolver;

use std::collections::BTreeMap;
use std::fmt;

use rusqlite::types::Value as SqlValue;
use serde::Serialize;

use crate::store::Store;
use crate::{Error, Result};

pub const CUSTOM_FRAME_RATE: &str = "CustomFrameRate";
pub const RAY_TRACING: &str = "RayTracing";
pub const RAY_TRACED_REFLECTION: &str = "RayTracedReflection";
pub const RAY_TRACED_GI: &str = "RayTracedGI";
pub const XESS_ENABLE: &str = "XessEnable";
pub const XESS_QUALITY: &str = "XessQuality";

/// Synthetic menu-state keys written by the exporter, never read back
/// into the entry model.
pub const MENU_DATA: &str = "MenuData";
pub const PLAY_MENU_INFO: &str = "PlayMenuInfo";

/// Frame rate bounds accepted by the client.
pub const FRAME_RATE_MIN: i64 = 30;
pub const FRAME_RATE_MAX: i64 = 120;

/// The settings this tool knows how to edit, in display order.
pub const KNOWN_SETTINGS: [&str; 6] = [
    CUSTOM_FRAME_RATE,
    RAY_TRACING,
    RAY_TRACED_REFLECTION,
    RAY_TRACED_GI,
    XESS_ENABLE,
    XESS_QUALITY,
];

/// Whether a key belongs to the fixed editing vocabulary.
pub fn is_known(key: &str) -> bool {
    KNOWN_SETTINGS.contains(&key)
}

/// A stored setting value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Promote a raw stored string: integer first, then finite float,
    /// otherwise it stays text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            Value::Int(i)
        } else {
            match raw.parse::<f64>() {
                Ok(f) if f.is_finite() => Value::Real(f),
                _ => Value::Text(raw.to_string()),
            }
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// True for the integer zero; cascade rules compare against it.
    pub fn is_zero(&self) -> bool {
        self.as_int() == Some(0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One stored setting with its load-time snapshot and pending state.
///
/// `original_value` never changes after load; `current_value` tracks the
/// session's resolved edits.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub key: String,
    pub original_value: Value,
    pub current_value: Value,
}

impl Entry {
    pub fn is_modified(&self) -> bool {
        self.current_value != self.original_value
    }
}

/// Accumulated user-driven delta, keyed by setting name. BTreeMap gives
/// deterministic iteration, which keeps exports byte-reproducible.
pub type PendingChanges = BTreeMap<String, Value>;

/// Ray tracing quality levels exposed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RayTracingLevel {
    Off,
    Low,
    Medium,
    High,
}

impl RayTracingLevel {
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Read every row of the settings table in storage order.
pub fn extract(store: &Store) -> Result<Vec<Entry>> {
    let rows = store.read_rows("SELECT Key, Value FROM LocalStorage", [])?;
    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        let key = text_of(row.first());
        let value = Value::parse(&text_of(row.get(1)));
        entries.push(Entry {
            key,
            original_value: value.clone(),
            current_value: value,
        });
    }
    Ok(entries)
}

fn text_of(column: Option<&SqlValue>) -> String {
    match column {
        Some(SqlValue::Text(s)) => s.clone(),
        Some(SqlValue::Integer(i)) => i.to_string(),
        Some(SqlValue::Real(r)) => r.to_string(),
        Some(SqlValue::Blob(b)) => String::from_utf8_lossy(b).into_owned(),
        Some(SqlValue::Null) | None => String::new(),
    }
}

/// Check a user assignment against the known-setting constraints.
///
/// Keys outside the fixed vocabulary are accepted verbatim; the store
/// carries plenty of rows this tool does not interpret.
pub fn validate_assignment(key: &str, value: &Value) -> Result<()> {
    match key {
        CUSTOM_FRAME_RATE => {
            let v = int_or_invalid(key, value)?;
            if !(FRAME_RATE_MIN..=FRAME_RATE_MAX).contains(&v) {
                return Err(Error::InvalidValue(format!(
                    "{key} must be between {FRAME_RATE_MIN} and {FRAME_RATE_MAX}, got {v}"
                )));
            }
        }
        RAY_TRACING => {
            let v = int_or_invalid(key, value)?;
            if RayTracingLevel::from_value(v).is_none() {
                return Err(Error::InvalidValue(format!(
                    "{key} must be 0 (off), 1 (low), 2 (medium) or 3 (high), got {v}"
                )));
            }
        }
        RAY_TRACED_REFLECTION | RAY_TRACED_GI | XESS_ENABLE | XESS_QUALITY => {
            let v = int_or_invalid(key, value)?;
            if v != 0 && v != 1 {
                return Err(Error::InvalidValue(format!("{key} must be 0 or 1, got {v}")));
            }
        }
        _ => {}
    }
    Ok(())
}

fn int_or_invalid(key: &str, value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| Error::InvalidValue(format!("{key} must be an integer, got '{value}'")))
}
