use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

/// Cache-control contract consumed by the CDN sitting in front of this
/// service. The engine itself never caches.
#[derive(Debug, Clone, Copy)]
pub enum CachePolicy {
    /// Short per-listing cache, helps repeat visits and refreshes.
    Listing,
    /// Featured results: longer shared cache with stale-while-revalidate.
    Featured,
    /// Never cache (errors).
    None,
}

impl CachePolicy {
    fn header_value(self) -> &'static str {
        match self {
            CachePolicy::Listing => "public, max-age=60",
            CachePolicy::Featured => {
                "public, max-age=30, s-maxage=300, stale-while-revalidate=86400"
            }
            CachePolicy::None => "no-store",
        }
    }
}

pub fn json_response<T: Serialize>(
    status: u16,
    body: &T,
    cache: CachePolicy,
) -> Result<Response, ServerError> {
    let body = serde_json::to_string(body).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Access-Control-Allow-Origin", "*")
        .header("Cache-Control", cache.header_value())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)?;

    Ok(resp)
}
