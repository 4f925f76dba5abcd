pub mod errors;
pub mod json;

// These two *are* in responses/errors.rs
pub use errors::error_to_response;

// Normal JSON response
pub use json::{json_response, CachePolicy};
