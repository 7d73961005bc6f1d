use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// A subscribed source, keyed by its URL.
///
/// Unknown fields in a persisted record are ignored and missing optional
/// fields fall back to their defaults, so older cache blobs keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub is_default: bool,
}

impl Feed {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            link: None,
            description: None,
            image_url: None,
            posts: Vec::new(),
            is_default: false,
        }
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_with_title() {
        let feed = Feed::new("https://example.com/feed.xml", "Example");
        assert_eq!(feed.display_title(), "Example");
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        let feed = Feed::new("https://example.com/feed.xml", "  ");
        assert_eq!(feed.display_title(), "https://example.com/feed.xml");
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Feed::new("https://example.com/feed.xml", "Example");
        let mut b = a.clone();
        assert_eq!(a, b);

        b.posts.push(Post::new("https://example.com/feed.xml", "New post"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "url": "https://example.com/feed.xml",
            "title": "Example",
            "subscribers": 42,
            "posts": []
        }"#;
        let feed: Feed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.url, "https://example.com/feed.xml");
        assert!(!feed.is_default);
        assert!(feed.image_url.is_none());
    }
}
