use serde_json::Value;

// The feed nests its records array under different top-level keys depending
// on which API surface answered (raw bundle, OData, legacy). Isolating the
// shape-sniffing here keeps the engine blind to it.
const RECORD_KEYS: [&str; 3] = ["bundle", "value", "listings"];
const TOTAL_KEYS: [&str; 2] = ["total", "@odata.count"];

/// Pulls the records array out of a raw feed payload, wherever it sits.
/// `None` means the payload had no recognizable array at all.
pub fn extract_records(payload: &Value) -> Option<Vec<Value>> {
    if let Some(arr) = payload.as_array() {
        return Some(arr.clone());
    }
    for key in RECORD_KEYS {
        if let Some(arr) = payload.get(key).and_then(Value::as_array) {
            return Some(arr.clone());
        }
    }
    None
}

/// Total record count, when the feed bothers to report one.
pub fn extract_total(payload: &Value) -> Option<u64> {
    for key in TOTAL_KEYS {
        if let Some(n) = payload.get(key).and_then(Value::as_u64) {
            return Some(n);
        }
    }
    None
}
