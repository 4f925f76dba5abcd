use crate::errors::ServerError;
use crate::responses::json::{json_response, CachePolicy};
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

/// Convert a ServerError into a well-formed JSON response.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, message) = match &err {
        ServerError::NotFound => (404, "Not Found".to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };

    let body = ErrorBody {
        success: false,
        error: &message,
    };

    json_response(status, &body, CachePolicy::None).unwrap_or_else(|_| fallback(status))
}

fn fallback(status: u16) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from("{\"success\":false}"))
        .unwrap()
}
