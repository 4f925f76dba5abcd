// src/engine/matcher.rs

use crate::engine::visibility::field_text;
use serde_json::Value;

/// Joined projection of the configured search fields, lowercased.
fn haystack(record: &Value, fields: &[&str]) -> String {
    let mut parts = Vec::new();
    for field in fields {
        if let Some(v) = field_text(record, field) {
            parts.push(v);
        }
    }
    parts.join(" | ").to_lowercase()
}

fn strip_non_alnum(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Conjunctive substring match: every whitespace-delimited token of `query`
/// must appear in the haystack. Each token is tried against the literal
/// haystack and, stripped of punctuation, against a stripped variant so that
/// "t2p1j9" still finds "T2P 1J9". Note this normalization is deliberately
/// looser than the strict identifier normalization in `identifier.rs`.
/// An empty query matches everything.
pub fn matches(record: &Value, query: &str, fields: &[&str]) -> bool {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return true;
    }

    let literal = haystack(record, fields);
    let stripped = strip_non_alnum(&literal);

    tokens.iter().all(|token| {
        if literal.contains(token.as_str()) {
            return true;
        }
        let token_stripped = strip_non_alnum(token);
        !token_stripped.is_empty() && stripped.contains(token_stripped.as_str())
    })
}
