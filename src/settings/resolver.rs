//! Cascade resolution for interdependent settings.
//!
//! One user edit can imply several stored changes: the ray tracing
//! master switch drags its dependent toggles with it, and XeSS is
//! mutually exclusive with ray tracing. The resolver is a pure function
//! of the edit and the entry snapshot; applying the returned change set
//! to the display model and the pending delta is the caller's job, and
//! must happen as one unit.

use std::collections::BTreeMap;

use super::{
    Entry, RAY_TRACED_GI, RAY_TRACED_REFLECTION, RAY_TRACING, Value, XESS_ENABLE, XESS_QUALITY,
};

/// Compute the full change set for one user-initiated edit.
pub fn resolve(key: &str, new_value: Value, entries: &[Entry]) -> BTreeMap<String, Value> {
    let mut changes = BTreeMap::new();
    changes.insert(key.to_string(), new_value.clone());

    if key != RAY_TRACING {
        return changes;
    }

    if new_value.is_zero() {
        // Ray tracing off: the dependent toggles go dark with it.
        changes.insert(RAY_TRACED_REFLECTION.to_string(), Value::Int(0));
        changes.insert(RAY_TRACED_GI.to_string(), Value::Int(0));

        // XeSS comes back at its load-time baseline, not whatever the
        // session had set while ray tracing was on. Stores without the
        // XeSS rows get nothing synthesized.
        for xess in [XESS_ENABLE, XESS_QUALITY] {
            if let Some(entry) = entries.iter().find(|e| e.key == xess) {
                changes.insert(xess.to_string(), entry.original_value.clone());
            }
        }
    } else {
        // XeSS and ray tracing are mutually exclusive.
        changes.insert(XESS_ENABLE.to_string(), Value::Int(0));
        changes.insert(XESS_QUALITY.to_string(), Value::Int(0));
    }

    changes
}
