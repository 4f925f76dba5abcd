// src/engine/visibility.rs

use serde_json::Value;

/// Stringified view of a record field that may arrive as a string, number,
/// or bool. `None` for absent or null.
pub fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Whether a record may be shown at all. The display flag is read under the
/// configured aliases, first non-absent wins; "N", "0" and "FALSE" (any
/// case) hide the record, everything else, including absence, shows it.
pub fn is_visible(record: &Value, display_fields: &[&str]) -> bool {
    for field in display_fields {
        if let Some(v) = field_text(record, field) {
            let v = v.trim().to_uppercase();
            return v != "N" && v != "0" && v != "FALSE";
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Active,
    Pending,
    Sold,
    Unknown,
}

/// Feed status strings are free-form, so classification is by substring.
/// Check order sets precedence: sold beats pending beats active.
pub fn classify_status(raw: &str) -> StatusClass {
    let s = raw.trim().to_lowercase();
    if s.contains("sold") {
        StatusClass::Sold
    } else if s.contains("pending") || s.contains("contingent") {
        StatusClass::Pending
    } else if s.contains("active") || s == "a" || s == "act" {
        StatusClass::Active
    } else {
        StatusClass::Unknown
    }
}

/// Display filter composed with the status predicate: sold and pending
/// records are excluded, unknown statuses pass.
pub fn is_available(record: &Value, display_fields: &[&str], status_fields: &[&str]) -> bool {
    if !is_visible(record, display_fields) {
        return false;
    }
    for field in status_fields {
        if let Some(v) = field_text(record, field) {
            return !matches!(
                classify_status(&v),
                StatusClass::Sold | StatusClass::Pending
            );
        }
    }
    true
}
