// client.rs
use crate::feed::models::{extract_records, extract_total};
use crate::feed::FeedError;
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const UPSTREAM_TIMEOUT_SECS: u64 = 12;
const MAX_ATTEMPTS: u64 = 2;
const JITTER_MAX_MILLIS: u64 = 250;

/// One page of raw listing records. `total` is whatever count the feed
/// reported, if any.
pub struct FeedPage {
    pub records: Vec<Value>,
    pub total: Option<u64>,
}

/// The two query shapes the engine needs from the upstream feed.
pub trait ListingFeed {
    /// Paginated listing: a bounded slice of the feed at `offset`.
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<FeedPage, FeedError>;

    /// Filtered single-record lookup: `field eq 'value'`, zero-or-one record.
    fn lookup(&self, field: &str, value: &str) -> Result<Option<Value>, FeedError>;
}

#[derive(Clone)]
pub struct BridgeClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl BridgeClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, FeedError> {
        Url::parse(&format!("{}/{path}", self.base_url))
            .map_err(|e| FeedError::Config(format!("bad feed URL: {e}")))
    }

    fn get_json(&self, url: Url) -> Result<Value, FeedError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let start = std::time::Instant::now();

            match self.try_get_json(url.clone()) {
                Ok(payload) => return Ok(payload),
                Err(e) => {
                    eprintln!(
                        "⚠️ Feed attempt {attempt} failed in {:?}: {e}",
                        start.elapsed()
                    );
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_MILLIS);
                        std::thread::sleep(Duration::from_millis(100 * attempt + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| FeedError::Network("feed retry loop failed".into())))
    }

    fn try_get_json(&self, url: Url) -> Result<Value, FeedError> {
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| FeedError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16(), snippet(&text)));
        }

        serde_json::from_str(&text).map_err(|e| FeedError::JsonParse(e.to_string()))
    }
}

impl ListingFeed for BridgeClient {
    fn fetch_page(&self, offset: usize, limit: usize) -> Result<FeedPage, FeedError> {
        let mut url = self.endpoint("listings")?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let payload = self.get_json(url)?;
        let records = extract_records(&payload)
            .ok_or_else(|| FeedError::UnexpectedShape("no records array in page".into()))?;

        Ok(FeedPage {
            total: extract_total(&payload),
            records,
        })
    }

    fn lookup(&self, field: &str, value: &str) -> Result<Option<Value>, FeedError> {
        let mut url = self.endpoint("Property")?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("$top", "1")
            .append_pair("$filter", &format!("{field} eq '{value}'"));

        let payload = self.get_json(url)?;
        let mut records = extract_records(&payload)
            .ok_or_else(|| FeedError::UnexpectedShape("no records array in lookup".into()))?;

        if records.is_empty() {
            Ok(None)
        } else {
            Ok(Some(records.remove(0)))
        }
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(500).collect()
}
