// src/engine/scan.rs

use crate::config::EngineConfig;
use crate::feed::ListingFeed;
use serde_json::Value;

/// Why the scan loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// Enough matches collected to serve the requested window.
    Satisfied,
    /// The feed returned a short chunk: end of the feed.
    Exhausted,
    /// The scan budget ran out first.
    Budgeted,
    /// Upstream failed before the scan could make progress.
    Failed,
}

pub struct ScanOutcome {
    pub collected: Vec<Value>,
    pub total_matches_seen: u64,
    pub scanned: usize,
    pub end: ScanEnd,
    pub error: Option<String>,
}

const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Sequential chunked scan over the paginated feed.
///
/// Every record of every chunk goes through `accept`; accepted records are
/// all counted, but only stored while the collection is still short of
/// `need` (the end of the requested window). Transitions are evaluated at
/// chunk granularity, in priority order: Satisfied, then Exhausted, then
/// Budgeted. The final chunk is shrunk to the remaining budget, so
/// `scanned` never exceeds `budget`.
///
/// A failed first chunk ends the scan immediately with an error indicator.
/// A failed later chunk is treated as empty and skipped, but three failures
/// in a row abort the scan. Any skipped chunk leaves records unexamined, so
/// the outcome carries the error indicator and `total_matches_seen` must be
/// read as a lower bound.
pub fn scan<F, P>(
    feed: &F,
    config: &EngineConfig,
    budget: usize,
    need: usize,
    mut accept: P,
) -> ScanOutcome
where
    F: ListingFeed,
    P: FnMut(&Value) -> bool,
{
    let mut collected: Vec<Value> = Vec::new();
    let mut total_matches_seen: u64 = 0;
    let mut scanned: usize = 0;
    let mut offset: usize = 0;
    let mut consecutive_failures: u32 = 0;
    let mut skip_error: Option<String> = None;

    loop {
        if scanned >= budget {
            return ScanOutcome {
                collected,
                total_matches_seen,
                scanned,
                end: ScanEnd::Budgeted,
                error: skip_error,
            };
        }

        let chunk = config.chunk_size.min(budget - scanned);

        match feed.fetch_page(offset, chunk) {
            Ok(page) => {
                consecutive_failures = 0;

                let fetched = page.records.len();
                scanned += fetched.min(chunk);

                for record in page.records.iter().take(chunk) {
                    if accept(record) {
                        total_matches_seen += 1;
                        if collected.len() < need {
                            collected.push(record.clone());
                        }
                    }
                }

                if collected.len() >= need {
                    return ScanOutcome {
                        collected,
                        total_matches_seen,
                        scanned,
                        end: ScanEnd::Satisfied,
                        error: skip_error,
                    };
                }

                if fetched < chunk {
                    return ScanOutcome {
                        collected,
                        total_matches_seen,
                        scanned,
                        end: ScanEnd::Exhausted,
                        error: skip_error,
                    };
                }

                offset += chunk;
            }

            Err(e) => {
                consecutive_failures += 1;
                eprintln!("⚠️ Feed chunk at offset {offset} failed ({consecutive_failures}): {e}");

                // Nothing scanned yet means the request can't be answered.
                if offset == 0 {
                    return ScanOutcome {
                        collected: Vec::new(),
                        total_matches_seen: 0,
                        scanned: 0,
                        end: ScanEnd::Failed,
                        error: Some(e.to_string()),
                    };
                }

                if consecutive_failures >= MAX_CONSECUTIVE_FAILURES {
                    eprintln!("❌ Too many feed failures, aborting scan");
                    return ScanOutcome {
                        collected,
                        total_matches_seen,
                        scanned,
                        end: ScanEnd::Failed,
                        error: Some(e.to_string()),
                    };
                }

                // Treat the chunk as empty and move on, but remember that
                // this offset range went unexamined.
                skip_error = Some(e.to_string());
                offset += chunk;
            }
        }
    }
}
