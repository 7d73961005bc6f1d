use chrono::Utc;
use feed_rs::model::{self, Entry};
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, TributaryError};
use crate::domain::{Feed, Post};

/// Turns raw feed markup into a [`Feed`].
pub trait FeedParser {
    fn parse(&self, url: &str, body: &[u8], is_default: bool) -> Result<Feed>;
}

/// Parses RSS 0.9x/1.0/2.0, Atom and JSON Feed through `feed-rs`.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }
}

impl FeedParser for Normalizer {
    fn parse(&self, url: &str, body: &[u8], is_default: bool) -> Result<Feed> {
        let parsed = parser::parse(body).map_err(|e| TributaryError::FeedParse(e.to_string()))?;

        let posts = parsed
            .entries
            .into_iter()
            .map(|entry| normalize_entry(url, entry))
            .collect();

        Ok(Feed {
            url: url.to_string(),
            title: parsed.title.map(|t| decode_text(&t)).unwrap_or_default(),
            link: parsed.links.first().map(|l| l.href.clone()),
            description: parsed.description.map(|d| decode_text(&d)),
            image_url: parsed.logo.or(parsed.icon).map(|image| image.uri),
            posts,
            is_default,
        })
    }
}

fn normalize_entry(feed_url: &str, entry: Entry) -> Post {
    let image_url = entry_image(&entry);

    Post {
        title: entry.title.map(|t| decode_text(&t)).unwrap_or_default(),
        link: entry.links.first().map(|l| l.href.clone()),
        description: entry
            .summary
            .map(|s| decode_text(&s))
            .or_else(|| {
                entry
                    .content
                    .and_then(|c| c.body)
                    .map(|b| decode_html_entities(&b).to_string())
            }),
        published_at: entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc)),
        image_url,
        feed_url: feed_url.to_string(),
    }
}

fn entry_image(entry: &Entry) -> Option<String> {
    let thumbnail = entry
        .media
        .iter()
        .flat_map(|media| media.thumbnails.iter())
        .map(|thumbnail| thumbnail.image.uri.clone())
        .next();

    thumbnail.or_else(|| {
        entry
            .media
            .iter()
            .flat_map(|media| media.content.iter())
            .filter(|content| {
                content
                    .content_type
                    .as_ref()
                    .is_some_and(|mime| mime.ty().as_str() == "image")
            })
            .find_map(|content| content.url.as_ref().map(|u| u.to_string()))
    })
}

fn decode_text(text: &model::Text) -> String {
    decode_html_entities(&text.content).to_string()
}
