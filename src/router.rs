use crate::engine::{Engine, SearchRequest};
use crate::errors::{ResultResp, ServerError};
use crate::feed::ListingFeed;
use crate::responses::{json_response, CachePolicy};
use astra::Request;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Everything a request handler needs.
#[derive(Clone)]
pub struct App<F> {
    pub engine: Engine<F>,
    /// Fallback ids for /featured when the caller passes none.
    pub featured_ids: Vec<String>,
}

const MAX_FEATURED_IDS: usize = 20;

pub fn handle<F: ListingFeed + Sync>(req: Request, app: &App<F>) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);

    match (method.as_str(), path.as_str()) {
        ("GET", "/listings") => listings(app, &params),
        ("GET", "/listing") => listing(app, &params),
        ("GET", "/featured") => featured(app, &params),
        _ => Err(ServerError::NotFound),
    }
}

/// Free-text (or match-all) paged search over the feed.
fn listings<F: ListingFeed + Sync>(
    app: &App<F>,
    params: &HashMap<String, String>,
) -> ResultResp {
    let query = params.get("q").cloned().unwrap_or_default();
    let offset = parse_usize(params, "offset")?.unwrap_or(0);
    let limit = parse_usize(params, "limit")?;
    let budget = parse_usize(params, "budget")?;

    let request = SearchRequest::new(None, Some(query), offset, limit, budget, app.engine.config())
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let result = app.engine.search(&request);
    json_response(200, &result, CachePolicy::Listing)
}

#[derive(Serialize)]
struct ListingBody<'a> {
    success: bool,
    listing: Option<&'a Value>,
}

/// Single-listing detail by id or mls token.
fn listing<F: ListingFeed + Sync>(app: &App<F>, params: &HashMap<String, String>) -> ResultResp {
    let token = param_trimmed(params, "id")
        .or_else(|| param_trimmed(params, "mls"))
        .ok_or_else(|| ServerError::BadRequest("Missing id or mls".into()))?;

    match app.engine.resolve_one(&token) {
        Some(record) => json_response(
            200,
            &ListingBody {
                success: true,
                listing: Some(&record),
            },
            CachePolicy::Listing,
        ),
        None => json_response(
            404,
            &ListingBody {
                success: false,
                listing: None,
            },
            CachePolicy::Listing,
        ),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeaturedBody {
    success: bool,
    listings: Vec<Value>,
    total_matches: usize,
}

/// Pinned-identifier batch: ids from the query string or the configured
/// fallback list, resolved in input order.
fn featured<F: ListingFeed + Sync>(app: &App<F>, params: &HashMap<String, String>) -> ResultResp {
    let limit = parse_usize(params, "limit")?.unwrap_or(3).clamp(1, 3);

    let ids: Vec<String> = match param_trimmed(params, "ids") {
        Some(raw) => raw
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        None => app.featured_ids.clone(),
    };
    let ids: Vec<String> = ids.into_iter().take(MAX_FEATURED_IDS).collect();

    if ids.is_empty() {
        return json_response(
            200,
            &FeaturedBody {
                success: true,
                listings: Vec::new(),
                total_matches: 0,
            },
            CachePolicy::Featured,
        );
    }

    let request = SearchRequest::new(Some(ids), None, 0, Some(limit), None, app.engine.config())
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let result = app.engine.search(&request);
    let total_matches = result.page.len();

    json_response(
        200,
        &FeaturedBody {
            success: true,
            listings: result.page,
            total_matches,
        },
        CachePolicy::Featured,
    )
}

fn param_trimmed(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_usize(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<usize>, ServerError> {
    match params.get(key).map(String::as_str) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("invalid {key}: {raw}"))),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
            map.insert(k.into_owned(), v.into_owned());
        }
    }

    map
}
