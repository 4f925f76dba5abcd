pub mod client;
pub mod feed_error;
pub mod models;

pub use client::{BridgeClient, FeedPage, ListingFeed};
pub use feed_error::FeedError;
