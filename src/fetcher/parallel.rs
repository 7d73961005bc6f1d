use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::app::{Result, TributaryError};
use crate::cache::FeedCache;
use crate::domain::Feed;
use crate::fetcher::FeedFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub is_default: bool,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, is_default: bool) -> Self {
        Self {
            url: url.into(),
            is_default,
        }
    }
}

/// Fans fetches out to one task per URL.
///
/// Unbounded unless built with [`ParallelFetcher::with_workers`], in which
/// case a semaphore caps the number of fetches in flight.
pub struct ParallelFetcher {
    fetcher: Arc<dyn FeedFetcher + Send + Sync>,
    semaphore: Option<Arc<Semaphore>>,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn FeedFetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            semaphore: None,
        }
    }

    pub fn with_workers(fetcher: Arc<dyn FeedFetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Some(Arc::new(Semaphore::new(workers.max(1)))),
        }
    }

    pub fn from_workers(fetcher: Arc<dyn FeedFetcher + Send + Sync>, workers: Option<usize>) -> Self {
        match workers {
            Some(workers) => Self::with_workers(fetcher, workers),
            None => Self::new(fetcher),
        }
    }

    pub fn fetcher(&self) -> &Arc<dyn FeedFetcher + Send + Sync> {
        &self.fetcher
    }

    /// Fetch every request concurrently, saving each feed into `cache` as
    /// soon as it arrives.
    ///
    /// Returns the feeds in request order once all of them succeeded. The
    /// first failure aborts the fetches still running and is returned;
    /// feeds saved before it stay in the cache.
    pub async fn fetch_all(
        &self,
        requests: Vec<FetchRequest>,
        cache: Arc<FeedCache>,
    ) -> Result<Vec<Feed>> {
        let mut feeds: Vec<Option<Feed>> = vec![None; requests.len()];
        let mut pending = FuturesUnordered::new();

        for (index, request) in requests.into_iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();
            let cache = cache.clone();

            pending.push(tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => Some(
                        semaphore
                            .acquire_owned()
                            .await
                            .map_err(|e| TributaryError::Other(e.to_string()))?,
                    ),
                    None => None,
                };

                let feed = fetch_single_feed(fetcher.as_ref(), &request, &cache).await?;
                Ok::<_, TributaryError>((index, feed))
            }));
        }

        while let Some(joined) = pending.next().await {
            let outcome = joined.map_err(TributaryError::from).and_then(|result| result);

            match outcome {
                Ok((index, feed)) => feeds[index] = Some(feed),
                Err(e) => {
                    for handle in pending.iter() {
                        handle.abort();
                    }
                    tracing::error!("Fan-out fetch failed: {}", e);
                    return Err(e);
                }
            }
        }

        Ok(feeds.into_iter().flatten().collect())
    }
}

async fn fetch_single_feed(
    fetcher: &(dyn FeedFetcher + Send + Sync),
    request: &FetchRequest,
    cache: &FeedCache,
) -> Result<Feed> {
    let feed = fetcher.fetch(&request.url, request.is_default).await?;
    cache.save(feed.clone()).await?;
    Ok(feed)
}
