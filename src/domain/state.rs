use std::cmp::Reverse;

use crate::domain::{Feed, Post};

/// Snapshot published by the feed store.
///
/// `progress` is true while a refresh, add or delete is in flight.
/// `selected_feed` holds the URL of the selected feed; `None` means all feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub progress: bool,
    pub feeds: Vec<Feed>,
    pub selected_feed: Option<String>,
}

impl FeedState {
    pub fn new(progress: bool, feeds: Vec<Feed>) -> Self {
        Self {
            progress,
            feeds,
            selected_feed: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.progress
    }

    pub fn contains(&self, url: &str) -> bool {
        self.feeds.iter().any(|feed| feed.url == url)
    }

    pub fn selected(&self) -> Option<&Feed> {
        let url = self.selected_feed.as_deref()?;
        self.feeds.iter().find(|feed| feed.url == url)
    }

    /// Posts of the selected feed, or of every feed when nothing is selected,
    /// newest first. Undated posts sort last.
    pub fn main_feed_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = match self.selected() {
            Some(feed) => feed.posts.iter().collect(),
            None => self.feeds.iter().flat_map(|feed| feed.posts.iter()).collect(),
        };
        posts.sort_by_key(|post| Reverse(post.published_at));
        posts
    }
}
