// src/engine/pager.rs

use crate::engine::identifier::{normalize_id, record_has_id};
use crate::engine::media::secure_media;
use crate::engine::scan::{ScanEnd, ScanOutcome};
use crate::engine::types::{SearchRequest, SearchResult};
use crate::engine::visibility::field_text;
use serde_json::Value;
use std::collections::HashSet;

/// Applies the `[offset, offset+limit)` window.
pub fn window(records: Vec<Value>, offset: usize, limit: usize) -> Vec<Value> {
    records.into_iter().skip(offset).take(limit).collect()
}

/// Result assembly for a scan-backed search: window applied in discovery
/// order, media secured on the way out.
pub fn from_scan(outcome: ScanOutcome, request: &SearchRequest) -> SearchResult {
    let need = request.offset.saturating_add(request.limit);
    let truncated = outcome.end == ScanEnd::Budgeted && outcome.collected.len() < need;

    let page = window(outcome.collected, request.offset, request.limit)
        .iter()
        .map(secure_media)
        .collect();

    SearchResult {
        page,
        total_matches_seen: outcome.total_matches_seen,
        truncated,
        scanned_count: outcome.scanned,
        error: outcome.error,
    }
}

/// Caller-order aggregation for identifier batches: each input token maps to
/// its directly-resolved record or a scan hit, misses are dropped (never
/// padded), and a record reachable through several identifier fields is
/// emitted once.
pub fn aggregate_batch(
    tokens: &[String],
    resolved: &[Option<Value>],
    scan_hits: &[Value],
    identifier_fields: &[&str],
) -> Vec<Value> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (token, direct) in tokens.iter().zip(resolved) {
        let target = normalize_id(token);

        let record = direct.as_ref().or_else(|| {
            if target.is_empty() {
                return None;
            }
            scan_hits
                .iter()
                .find(|r| record_has_id(r, &target, identifier_fields))
        });

        if let Some(record) = record {
            let fresh = match dedup_key(record, identifier_fields) {
                Some(key) => seen.insert(key),
                // No identifier at all: nothing to collide on, keep it.
                None => true,
            };
            if fresh {
                out.push(record.clone());
            }
        }
    }

    out
}

/// First present identifier field, normalized.
fn dedup_key(record: &Value, identifier_fields: &[&str]) -> Option<String> {
    identifier_fields
        .iter()
        .find_map(|field| field_text(record, field))
        .map(|v| normalize_id(&v))
}
