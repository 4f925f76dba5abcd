// src/engine/types.rs

use crate::config::EngineConfig;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// What the caller is asking for: a batch of identifier tokens, or free text.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    Identifiers(Vec<String>),
    Text(String),
}

/// A validated, clamped search request. Construct through [`SearchRequest::new`].
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub offset: usize,
    pub limit: usize,
    pub scan_budget: usize,
    /// Also exclude records whose status classifies as sold or pending.
    pub exclude_unavailable: bool,
}

impl SearchRequest {
    /// Validates raw parameters: a request must carry identifiers or a query
    /// string (an *empty* query string is allowed and matches everything);
    /// `limit` and `scan_budget` are clamped to the configured bounds.
    pub fn new(
        identifiers: Option<Vec<String>>,
        query: Option<String>,
        offset: usize,
        limit: Option<usize>,
        scan_budget: Option<usize>,
        config: &EngineConfig,
    ) -> Result<Self, RequestError> {
        let query = match (identifiers, query) {
            (Some(ids), _) => SearchQuery::Identifiers(
                ids.into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            ),
            (None, Some(q)) => SearchQuery::Text(q),
            (None, None) => return Err(RequestError::MissingQuery),
        };

        Ok(Self {
            query,
            offset,
            limit: limit.unwrap_or(config.default_limit).clamp(1, config.max_limit),
            scan_budget: scan_budget
                .unwrap_or(config.default_scan_budget)
                .clamp(1, config.max_scan_budget),
            exclude_unavailable: false,
        })
    }
}

/// Rejected before any upstream call is made.
#[derive(Debug, PartialEq, Eq)]
pub enum RequestError {
    MissingQuery,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingQuery => {
                write!(f, "request carries neither identifiers nor a query")
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// One page of results plus the scan accounting. `error` is set when an
/// upstream failure cut the request short; the result is still well-formed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub page: Vec<Value>,
    pub total_matches_seen: u64,
    pub truncated: bool,
    pub scanned_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            page: Vec::new(),
            total_matches_seen: 0,
            truncated: false,
            scanned_count: 0,
            error: None,
        }
    }
}
