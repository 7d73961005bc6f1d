//! Write-through feed cache.
//!
//! The whole URL → [`Feed`] set is the unit of durability: every mutation
//! re-serializes all entries into a single blob under [`FEED_CACHE_KEY`].
//! The in-memory copy is hydrated from the substrate on the first successful
//! read and is authoritative for the rest of the session. Nothing is written
//! until that read has happened.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::app::Result;
use crate::domain::Feed;
use crate::store::KeyValueStore;

pub const FEED_CACHE_KEY: &str = "feed_cache";

pub struct FeedCache {
    storage: Arc<dyn KeyValueStore + Send + Sync>,
    // None until the first access hydrates it
    memory: Mutex<Option<Vec<Feed>>>,
}

impl FeedCache {
    pub fn new(storage: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self {
            storage,
            memory: Mutex::new(None),
        }
    }

    pub async fn get(&self, url: &str) -> Option<Feed> {
        self.read(|feeds| feeds.iter().find(|feed| feed.url == url).cloned())
            .await
    }

    /// All cached feeds in insertion order.
    pub async fn get_all(&self) -> Vec<Feed> {
        self.read(|feeds| feeds.to_vec()).await
    }

    pub async fn urls(&self) -> Vec<String> {
        self.read(|feeds| feeds.iter().map(|feed| feed.url.clone()).collect())
            .await
    }

    pub async fn is_empty(&self) -> bool {
        self.read(|feeds| feeds.is_empty()).await
    }

    /// Upsert by URL, then write the full set.
    ///
    /// A replaced entry keeps its position. Memory is only updated once the
    /// durable write succeeded.
    pub async fn save(&self, feed: Feed) -> Result<()> {
        let mut memory = self.memory.lock().await;
        let feeds = self.hydrated(&mut memory)?;

        let mut next = feeds.clone();
        upsert(&mut next, feed);
        self.flush(&next)?;

        *feeds = next;
        Ok(())
    }

    pub async fn delete(&self, url: &str) -> Result<()> {
        let mut memory = self.memory.lock().await;
        let feeds = self.hydrated(&mut memory)?;

        let mut next = feeds.clone();
        next.retain(|feed| feed.url != url);
        self.flush(&next)?;

        *feeds = next;
        Ok(())
    }

    /// Reads see an empty cache while the substrate is unreadable; the next
    /// access tries again.
    async fn read<T>(&self, f: impl FnOnce(&[Feed]) -> T) -> T {
        let mut memory = self.memory.lock().await;
        match self.hydrated(&mut memory) {
            Ok(feeds) => f(feeds),
            Err(e) => {
                warn!(error = %e, "Failed to read feed cache");
                f(&[])
            }
        }
    }

    fn hydrated<'a>(&self, memory: &'a mut Option<Vec<Feed>>) -> Result<&'a mut Vec<Feed>> {
        let feeds = match memory.take() {
            Some(feeds) => feeds,
            None => self.load()?,
        };
        Ok(memory.insert(feeds))
    }

    fn flush(&self, feeds: &[Feed]) -> Result<()> {
        let blob = encode_feeds(feeds)?;
        self.storage.set_string(FEED_CACHE_KEY, &blob)?;
        debug!(count = feeds.len(), bytes = blob.len(), "Flushed feed cache");
        Ok(())
    }

    /// A failed read is an error; an undecodable blob loads as empty.
    fn load(&self) -> Result<Vec<Feed>> {
        let Some(blob) = self.storage.get_string(FEED_CACHE_KEY)? else {
            return Ok(Vec::new());
        };

        match decode_feeds(&blob) {
            Ok(feeds) => {
                debug!(count = feeds.len(), "Loaded feed cache");
                Ok(feeds)
            }
            Err(e) => {
                warn!(error = %e, "Failed to decode feed cache, starting empty");
                Ok(Vec::new())
            }
        }
    }
}

fn upsert(feeds: &mut Vec<Feed>, feed: Feed) {
    match feeds.iter_mut().find(|existing| existing.url == feed.url) {
        Some(existing) => *existing = feed,
        None => feeds.push(feed),
    }
}

pub fn encode_feeds(feeds: &[Feed]) -> Result<String> {
    Ok(serde_json::to_string(feeds)?)
}

/// Decode a cache blob. Duplicate URLs collapse onto the first position with
/// the last value.
pub fn decode_feeds(blob: &str) -> Result<Vec<Feed>> {
    let decoded: Vec<Feed> = serde_json::from_str(blob)?;
    let mut feeds = Vec::with_capacity(decoded.len());
    for feed in decoded {
        upsert(&mut feeds, feed);
    }
    Ok(feeds)
}
