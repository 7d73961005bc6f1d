use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::Result;
use crate::cache::FeedCache;
use crate::config::FeedsConfig;
use crate::domain::Feed;
use crate::fetcher::parallel::{FetchRequest, ParallelFetcher};
use crate::fetcher::FeedFetcher;

/// Reconciles the network with the feed cache.
pub struct FeedRepository {
    fetcher: ParallelFetcher,
    cache: Arc<FeedCache>,
    defaults: FeedsConfig,
}

impl FeedRepository {
    pub fn new(fetcher: ParallelFetcher, cache: Arc<FeedCache>, defaults: FeedsConfig) -> Self {
        Self {
            fetcher,
            cache,
            defaults,
        }
    }

    pub fn cache(&self) -> &Arc<FeedCache> {
        &self.cache
    }

    /// Cached feeds, or a fresh fetch of every known feed.
    ///
    /// The network is only touched when `force_update` is set or the cache is
    /// empty. An empty cache is seeded from the configured default URLs.
    pub async fn get_all_feeds(&self, force_update: bool) -> Result<Vec<Feed>> {
        let cached = self.cache.get_all().await;

        if !force_update && !cached.is_empty() {
            debug!("Serving {} feeds from cache", cached.len());
            return Ok(cached);
        }

        let urls: Vec<String> = if cached.is_empty() {
            self.defaults.default_urls.clone()
        } else {
            cached.into_iter().map(|feed| feed.url).collect()
        };

        // one request per URL, first occurrence wins
        let mut seen = HashSet::new();
        let requests: Vec<FetchRequest> = urls
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .map(|url| {
                let is_default = self.defaults.is_default(&url);
                FetchRequest::new(url, is_default)
            })
            .collect();

        info!("Fetching {} feeds", requests.len());
        self.fetcher.fetch_all(requests, self.cache.clone()).await
    }

    /// Fetch a single feed and store it. Call [`get_all_feeds`] to see it.
    ///
    /// [`get_all_feeds`]: FeedRepository::get_all_feeds
    pub async fn add_feed(&self, url: &str) -> Result<()> {
        let feed = self
            .fetcher
            .fetcher()
            .fetch(url, self.defaults.is_default(url))
            .await?;
        self.cache.save(feed).await?;
        info!("Added feed {}", url);
        Ok(())
    }

    pub async fn delete_feed(&self, url: &str) -> Result<()> {
        self.cache.delete(url).await?;
        info!("Deleted feed {}", url);
        Ok(())
    }
}
