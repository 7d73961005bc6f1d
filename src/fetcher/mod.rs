pub mod http_fetcher;
pub mod loader;
pub mod parallel;

#[cfg(test)]
pub(crate) mod stub;

use async_trait::async_trait;

use crate::app::{FetchError, Result};
use crate::domain::Feed;

pub use http_fetcher::HttpFetcher;
pub use loader::FeedLoader;
pub use parallel::ParallelFetcher;

/// Raw content retrieval for a feed URL.
#[async_trait]
pub trait Transport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Retrieves and parses one feed.
///
/// Every failure is reported as the same [`FetchError`] kind.
#[async_trait]
pub trait FeedFetcher {
    async fn fetch(&self, url: &str, is_default: bool) -> std::result::Result<Feed, FetchError>;
}
