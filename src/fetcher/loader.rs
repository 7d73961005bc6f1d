use std::sync::Arc;

use async_trait::async_trait;

use crate::app::FetchError;
use crate::domain::Feed;
use crate::fetcher::{FeedFetcher, Transport};
use crate::normalizer::FeedParser;

/// Fetches raw content over a [`Transport`] and hands it to a [`FeedParser`].
pub struct FeedLoader {
    transport: Arc<dyn Transport + Send + Sync>,
    parser: Arc<dyn FeedParser + Send + Sync>,
}

impl FeedLoader {
    pub fn new(
        transport: Arc<dyn Transport + Send + Sync>,
        parser: Arc<dyn FeedParser + Send + Sync>,
    ) -> Self {
        Self { transport, parser }
    }
}

#[async_trait]
impl FeedFetcher for FeedLoader {
    async fn fetch(&self, url: &str, is_default: bool) -> Result<Feed, FetchError> {
        let body = self
            .transport
            .fetch(url)
            .await
            .map_err(|e| FetchError::new(url, e))?;

        let feed = self
            .parser
            .parse(url, &body, is_default)
            .map_err(|e| FetchError::new(url, e))?;

        tracing::info!("Fetched {} posts from {}", feed.posts.len(), url);
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Result, TributaryError};
    use crate::normalizer::Normalizer;

    /// `None` answers every request with a 503.
    struct CannedTransport(Option<&'static str>);

    #[async_trait]
    impl Transport for CannedTransport {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            match self.0 {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(TributaryError::HttpStatus {
                    url: url.to_string(),
                    status: 503,
                }),
            }
        }
    }

    fn loader(transport: CannedTransport) -> FeedLoader {
        FeedLoader::new(Arc::new(transport), Arc::new(Normalizer::new()))
    }

    const BODY: &str = r#"<rss version="2.0"><channel><title>X</title>
        <item><title>p1</title><link>https://x/1</link></item>
        <item><title>p2</title><link>https://x/2</link></item>
        </channel></rss>"#;

    #[tokio::test]
    async fn test_fetch_parses_body() {
        let feed = loader(CannedTransport(Some(BODY)))
            .fetch("https://x/feed", true)
            .await
            .unwrap();

        assert_eq!(feed.url, "https://x/feed");
        assert_eq!(feed.title, "X");
        assert!(feed.is_default);
        assert_eq!(feed.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_fetch_error() {
        let err = loader(CannedTransport(None))
            .fetch("https://x/feed", false)
            .await
            .unwrap_err();

        assert_eq!(err.url, "https://x/feed");
        assert!(err.message.contains("503"));
    }

    #[tokio::test]
    async fn test_parse_failure_becomes_fetch_error() {
        let err = loader(CannedTransport(Some("definitely not a feed")))
            .fetch("https://x/feed", false)
            .await
            .unwrap_err();

        assert_eq!(err.url, "https://x/feed");
        assert!(!err.message.is_empty());
    }
}
