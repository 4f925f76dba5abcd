use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FeedError {
    Network(String),
    Status(u16, String),
    JsonParse(String),
    UnexpectedShape(String),
    Config(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "Network error: {msg}"),
            FeedError::Status(code, msg) => write!(f, "Upstream HTTP {code}: {msg}"),
            FeedError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            FeedError::UnexpectedShape(msg) => write!(f, "Unexpected payload shape: {msg}"),
            FeedError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl Error for FeedError {}
