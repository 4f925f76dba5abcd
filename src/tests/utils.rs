use crate::config::EngineConfig;
use crate::engine::{Engine, SearchRequest};
use crate::feed::{FeedError, FeedPage, ListingFeed};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory stand-in for the upstream feed. Pagination slices `records`;
/// lookups are exact string equality on the requested field. Call indices
/// listed in `fail_page_calls` return a network error instead.
pub struct FakeFeed {
    pub records: Vec<Value>,
    pub page_calls: AtomicUsize,
    pub lookup_calls: AtomicUsize,
    pub fail_page_calls: Vec<usize>,
    pub fail_lookups: bool,
}

impl FakeFeed {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records,
            page_calls: AtomicUsize::new(0),
            lookup_calls: AtomicUsize::new(0),
            fail_page_calls: Vec::new(),
            fail_lookups: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn lookups_made(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }
}

impl ListingFeed for FakeFeed {
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<FeedPage, FeedError> {
        let call = self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_page_calls.contains(&call) {
            return Err(FeedError::Network("connection refused".into()));
        }

        let records = if offset >= self.records.len() {
            Vec::new()
        } else {
            let end = (offset + limit).min(self.records.len());
            self.records[offset..end].to_vec()
        };

        Ok(FeedPage {
            records,
            total: Some(self.records.len() as u64),
        })
    }

    fn lookup(&self, field: &str, value: &str) -> Result<Option<Value>, FeedError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups {
            return Err(FeedError::Network("connection refused".into()));
        }

        Ok(self
            .records
            .iter()
            .find(|r| r.get(field).and_then(Value::as_str) == Some(value))
            .cloned())
    }
}

/// Minimal visible listing fixture.
pub fn listing(key: &str, mls: &str, address: &str, city: &str) -> Value {
    json!({
        "ListingKey": key,
        "ListingId": key,
        "MLSNumber": mls,
        "UnparsedAddress": address,
        "City": city,
        "StandardStatus": "Active",
        "InternetDisplayYN": "Y",
    })
}

pub fn engine_with(records: Vec<Value>) -> Engine<FakeFeed> {
    Engine::new(FakeFeed::new(records), EngineConfig::default())
}

pub fn text_request(q: &str, offset: usize, limit: usize) -> SearchRequest {
    SearchRequest::new(
        None,
        Some(q.to_string()),
        offset,
        Some(limit),
        None,
        &EngineConfig::default(),
    )
    .unwrap()
}

pub fn ids_request(ids: &[&str]) -> SearchRequest {
    SearchRequest::new(
        Some(ids.iter().map(|s| s.to_string()).collect()),
        None,
        0,
        Some(20),
        None,
        &EngineConfig::default(),
    )
    .unwrap()
}
