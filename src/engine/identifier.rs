// src/engine/identifier.rs

use crate::config::IdShape;
use crate::engine::visibility::field_text;
use serde_json::Value;

/// Canonical comparable form of an identifier token: trimmed, uppercased,
/// everything outside [A-Z0-9] stripped. Idempotent.
pub fn normalize_id(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Structured,
    FreeText,
}

/// Classifies a raw token against the feed's identifier shape, checked on
/// the token as typed (before normalization stripping).
pub fn classify(raw: &str, shape: &IdShape) -> IdKind {
    let t = raw.trim();

    let letter_count = t.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    if letter_count != shape.letters {
        return IdKind::FreeText;
    }

    // Leading chars are ASCII, so the byte index is safe.
    let rest = &t[letter_count..];
    let digit_count = rest.chars().take_while(|c| c.is_ascii_digit()).count();

    if digit_count == rest.chars().count()
        && digit_count >= shape.min_digits
        && digit_count <= shape.max_digits
    {
        IdKind::Structured
    } else {
        IdKind::FreeText
    }
}

/// Whether any of the record's identifier fields normalizes to `target`.
/// `target` must already be normalized and non-empty.
pub fn record_has_id(record: &Value, target: &str, identifier_fields: &[&str]) -> bool {
    identifier_fields.iter().any(|field| {
        field_text(record, field)
            .map(|v| normalize_id(&v) == target)
            .unwrap_or(false)
    })
}
