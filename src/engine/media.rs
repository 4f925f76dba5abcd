// src/engine/media.rs

use serde_json::Value;

const MEDIA_FIELD: &str = "Media";

/// A media entry field carries a URL when its name says so, e.g. "MediaURL"
/// or "ThumbnailUrl". Captions and descriptions are left alone even when
/// they happen to mention a link.
fn is_url_field(key: &str) -> bool {
    key.to_ascii_uppercase().contains("URL")
}

/// Copy of the record with insecure media URLs upgraded to https. Only the
/// URL-bearing fields of each media entry are touched; all other fields
/// pass through unchanged. Records without a media array come back
/// unchanged. Idempotent.
pub fn secure_media(record: &Value) -> Value {
    let mut copy = record.clone();

    if let Some(entries) = copy.get_mut(MEDIA_FIELD).and_then(Value::as_array_mut) {
        for entry in entries {
            if let Some(obj) = entry.as_object_mut() {
                for (key, value) in obj.iter_mut() {
                    if !is_url_field(key) {
                        continue;
                    }
                    if let Value::String(s) = value {
                        if let Some(rest) = s.strip_prefix("http://") {
                            *s = format!("https://{rest}");
                        }
                    }
                }
            }
        }
    }

    copy
}
