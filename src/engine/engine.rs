// engine.rs
use crate::config::EngineConfig;
use crate::engine::identifier::{classify, normalize_id, record_has_id, IdKind};
use crate::engine::matcher;
use crate::engine::media::secure_media;
use crate::engine::pager;
use crate::engine::scan::{scan, ScanEnd, ScanOutcome};
use crate::engine::types::{SearchQuery, SearchRequest, SearchResult};
use crate::engine::visibility;
use crate::feed::ListingFeed;
use serde_json::Value;

/// The resolution and search façade over one feed collaborator. Stateless
/// across requests; every request owns its own scan state.
#[derive(Clone)]
pub struct Engine<F> {
    feed: F,
    config: EngineConfig,
}

impl<F: ListingFeed + Sync> Engine<F> {
    pub fn new(feed: F, config: EngineConfig) -> Self {
        Self { feed, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Entry point: routes a validated request to the direct or scan path.
    /// Never panics and never propagates an upstream fault; every failure
    /// path yields a structurally valid result.
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        match &request.query {
            SearchQuery::Identifiers(tokens) => self.search_identifiers(tokens, request),
            SearchQuery::Text(q) => self.search_text(q, request),
        }
    }

    /// Detail lookup for one token: direct fast path first, bounded
    /// identifier scan as fallback, `None` when the feed has no such
    /// visible listing.
    pub fn resolve_one(&self, token: &str) -> Option<Value> {
        if let Some(record) = self.resolve_direct(token) {
            return Some(secure_media(&record));
        }

        let target = normalize_id(token);
        if target.is_empty() {
            return None;
        }

        let targets = [target];
        let outcome = self.scan_identifiers(&targets, self.config.default_scan_budget, 1);
        outcome
            .collected
            .into_iter()
            .next()
            .map(|r| secure_media(&r))
    }

    /// Single filtered upstream lookup tried against each identifier field
    /// in turn; a structured token tries the feed's structured field first.
    /// Field-level failures are logged and skipped. `None` signals the
    /// caller to fall back to the scan path.
    pub fn resolve_direct(&self, token: &str) -> Option<Value> {
        let normalized = normalize_id(token);
        if normalized.is_empty() {
            return None;
        }

        let mut fields: Vec<&str> = Vec::new();
        if classify(token, &self.config.id_shape) == IdKind::Structured {
            fields.push(self.config.structured_id_field);
        }
        for field in &self.config.identifier_fields {
            if !fields.contains(field) {
                fields.push(field);
            }
        }

        for field in fields {
            match self.feed.lookup(field, &normalized) {
                Ok(Some(record))
                    if visibility::is_visible(&record, &self.config.display_fields) =>
                {
                    return Some(record);
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("⚠️ Lookup {field} eq '{normalized}' failed: {e}");
                }
            }
        }

        None
    }

    /// Fan-out direct resolution: one scoped thread per token (callers cap
    /// the batch size), failures isolated per token, input order preserved.
    pub fn resolve_many(&self, tokens: &[String]) -> Vec<Option<Value>> {
        std::thread::scope(|s| {
            let handles: Vec<_> = tokens
                .iter()
                .map(|token| s.spawn(move || self.resolve_direct(token)))
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or(None))
                .collect()
        })
    }

    fn search_identifiers(&self, tokens: &[String], request: &SearchRequest) -> SearchResult {
        if tokens.is_empty() {
            return SearchResult::empty();
        }

        let resolved = self.resolve_many(tokens);

        // Tokens the direct path could not answer share one fallback scan.
        let unresolved: Vec<String> = tokens
            .iter()
            .zip(&resolved)
            .filter(|(_, r)| r.is_none())
            .map(|(t, _)| normalize_id(t))
            .filter(|n| !n.is_empty())
            .collect();

        let (scan_hits, scanned, truncated, error) = if unresolved.is_empty() {
            (Vec::new(), 0, false, None)
        } else {
            let outcome =
                self.scan_identifiers(&unresolved, request.scan_budget, unresolved.len());
            let truncated =
                outcome.end == ScanEnd::Budgeted && outcome.collected.len() < unresolved.len();
            (outcome.collected, outcome.scanned, truncated, outcome.error)
        };

        let ordered =
            pager::aggregate_batch(tokens, &resolved, &scan_hits, &self.config.identifier_fields);
        let total_matches_seen = ordered.len() as u64;

        let page = pager::window(ordered, request.offset, request.limit)
            .iter()
            .map(secure_media)
            .collect();

        SearchResult {
            page,
            total_matches_seen,
            truncated,
            scanned_count: scanned,
            error,
        }
    }

    fn search_text(&self, query: &str, request: &SearchRequest) -> SearchResult {
        // offset is caller-controlled and unbounded, so the window end must
        // not overflow.
        let need = request.offset.saturating_add(request.limit);
        let trimmed = query.trim();

        // A bare structured identifier typed into the search box still goes
        // through the direct path first, scan only as fallback.
        if !trimmed.is_empty() && classify(trimmed, &self.config.id_shape) == IdKind::Structured {
            if let Some(record) = self.resolve_direct(trimmed) {
                let page = pager::window(vec![record], request.offset, request.limit)
                    .iter()
                    .map(secure_media)
                    .collect();
                return SearchResult {
                    page,
                    total_matches_seen: 1,
                    truncated: false,
                    scanned_count: 0,
                    error: None,
                };
            }

            let targets = [normalize_id(trimmed)];
            let outcome = self.scan_identifiers(&targets, request.scan_budget, need);
            return pager::from_scan(outcome, request);
        }

        let outcome = scan(&self.feed, &self.config, request.scan_budget, need, |record| {
            self.record_passes(record, request)
                && matcher::matches(record, query, &self.config.haystack_fields)
        });
        pager::from_scan(outcome, request)
    }

    /// Identifier-equality scan shared by the fallback paths.
    fn scan_identifiers(&self, targets: &[String], budget: usize, need: usize) -> ScanOutcome {
        scan(&self.feed, &self.config, budget, need, |record| {
            visibility::is_visible(record, &self.config.display_fields)
                && targets
                    .iter()
                    .any(|t| record_has_id(record, t, &self.config.identifier_fields))
        })
    }

    fn record_passes(&self, record: &Value, request: &SearchRequest) -> bool {
        if request.exclude_unavailable {
            visibility::is_available(record, &self.config.display_fields, &self.config.status_fields)
        } else {
            visibility::is_visible(record, &self.config.display_fields)
        }
    }
}
