use std::fmt;
use std::sync::Arc;

use crate::app::TributaryError;
use crate::domain::Feed;

/// Intents accepted by [`FeedStore`](crate::app::FeedStore).
///
/// `Data` and `Error` are completion intents sent back by the store's own
/// background operations.
#[derive(Debug, Clone)]
pub enum FeedAction {
    /// Reload every feed; `force_load` bypasses the cache.
    Refresh { force_load: bool },
    Add { url: String },
    Delete { url: String },
    /// Select a feed by URL, or every feed with `None`.
    SelectFeed { url: Option<String> },
    Data { feeds: Vec<Feed> },
    Error { error: Arc<TributaryError> },
}

impl FeedAction {
    pub fn refresh(force_load: bool) -> Self {
        Self::Refresh { force_load }
    }

    pub fn add(url: impl Into<String>) -> Self {
        Self::Add { url: url.into() }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::Delete { url: url.into() }
    }

    pub fn select(url: Option<String>) -> Self {
        Self::SelectFeed { url }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh { .. } => "Refresh",
            Self::Add { .. } => "Add",
            Self::Delete { .. } => "Delete",
            Self::SelectFeed { .. } => "SelectFeed",
            Self::Data { .. } => "Data",
            Self::Error { .. } => "Error",
        }
    }
}

impl fmt::Display for FeedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refresh { force_load } => write!(f, "Refresh(force_load={force_load})"),
            Self::Add { url } => write!(f, "Add({url})"),
            Self::Delete { url } => write!(f, "Delete({url})"),
            Self::SelectFeed { url: Some(url) } => write!(f, "SelectFeed({url})"),
            Self::SelectFeed { url: None } => write!(f, "SelectFeed(all)"),
            Self::Data { feeds } => write!(f, "Data({} feeds)", feeds.len()),
            Self::Error { error } => write!(f, "Error({error})"),
        }
    }
}

/// Transient notifications that are never part of [`FeedState`](crate::domain::FeedState).
#[derive(Debug, Clone)]
pub enum FeedSideEffect {
    Error(Arc<TributaryError>),
}

impl FeedSideEffect {
    pub fn error(&self) -> &TributaryError {
        match self {
            Self::Error(error) => error,
        }
    }
}

impl fmt::Display for FeedSideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(f, "{error}"),
        }
    }
}
