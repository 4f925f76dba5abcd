pub mod engine;
pub mod identifier;
pub mod matcher;
pub mod media;
pub mod pager;
pub mod scan;
pub mod types;
pub mod visibility;

pub use engine::Engine;
pub use types::{RequestError, SearchQuery, SearchRequest, SearchResult};
