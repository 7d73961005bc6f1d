use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of a feed.
///
/// `feed_url` points back at the owning [`Feed`](crate::domain::Feed) by URL only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub feed_url: String,
}

impl Post {
    pub fn new(feed_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: None,
            description: None,
            published_at: None,
            image_url: None,
            feed_url: feed_url.into(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
