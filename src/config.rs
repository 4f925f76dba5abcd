// src/config.rs

/// Shape convention for the feed's structured identifiers, e.g. "E4467116"
/// is one letter followed by seven digits. Other deployments of the same
/// feed software use different conventions, so this is data, not code.
#[derive(Debug, Clone)]
pub struct IdShape {
    pub letters: usize,
    pub min_digits: usize,
    pub max_digits: usize,
}

/// Everything the engine needs to know about one feed deployment: which
/// fields carry identifiers, which carry the display flag and status, which
/// make up the free-text haystack, and the scan limits.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Identifier fields in lookup priority order. A single record is
    /// addressable through any of them.
    pub identifier_fields: Vec<&'static str>,
    /// Field tried first when a token matches the structured shape.
    pub structured_id_field: &'static str,
    /// Display-eligibility flag aliases, first non-absent wins.
    pub display_fields: Vec<&'static str>,
    /// Listing status aliases, first non-absent wins.
    pub status_fields: Vec<&'static str>,
    /// Fields projected into the free-text haystack, in order.
    pub haystack_fields: Vec<&'static str>,
    pub id_shape: IdShape,
    /// Upstream page size per scan chunk, independent of the caller's limit.
    pub chunk_size: usize,
    pub default_limit: usize,
    pub max_limit: usize,
    pub default_scan_budget: usize,
    pub max_scan_budget: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            identifier_fields: vec!["ListingKey", "ListingId", "MLSNumber"],
            structured_id_field: "MLSNumber",
            display_fields: vec![
                "InternetDisplayYN",
                "InternetEntireListingDisplayYN",
                "InternetEntireListingDisplay",
            ],
            status_fields: vec!["StandardStatus", "MlsStatus", "Status"],
            haystack_fields: vec![
                "UnparsedAddress",
                "StreetNumber",
                "StreetName",
                "City",
                "StateOrProvince",
                "PostalCode",
                "ListingId",
                "MLSNumber",
                "ListAgentFullName",
            ],
            id_shape: IdShape {
                letters: 1,
                min_digits: 6,
                max_digits: 10,
            },
            chunk_size: 200,
            default_limit: 20,
            max_limit: 200,
            default_scan_budget: 2000,
            max_scan_budget: 5000,
        }
    }
}
