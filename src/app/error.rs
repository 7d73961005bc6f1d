use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TributaryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation in progress")]
    InProgress,

    #[error("Unknown feed: {0}")]
    UnknownFeed(String),

    #[error("Unexpected action: {0}")]
    UnexpectedAction(String),

    /// An error raised inside the feed store and handed out as a side effect.
    #[error(transparent)]
    Store(Arc<TributaryError>),

    #[error("{0}")]
    Other(String),
}

impl TributaryError {
    /// The underlying error, looking through [`TributaryError::Store`].
    pub fn root(&self) -> &TributaryError {
        match self {
            Self::Store(inner) => inner.root(),
            other => other,
        }
    }
}

/// Any failure while retrieving a single feed.
///
/// Network errors, HTTP statuses and parse failures all collapse into this
/// one kind; only the message survives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub message: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, message: impl ToString) -> Self {
        Self {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TributaryError>;
