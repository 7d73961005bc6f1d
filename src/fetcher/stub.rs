use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::app::FetchError;
use crate::domain::{Feed, Post};
use crate::fetcher::FeedFetcher;

/// In-process [`FeedFetcher`] with canned answers per URL.
///
/// When gated, every fetch waits for a permit released through
/// [`StubFetcher::release`]. A URL marked with [`StubFetcher::hold`] waits
/// for [`StubFetcher::release_url`] instead.
#[derive(Default)]
pub(crate) struct StubFetcher {
    answers: Mutex<HashMap<String, Result<Feed, String>>>,
    calls: Mutex<Vec<(String, bool)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    held: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub(crate) fn succeed(self, feed: Feed) -> Self {
        self.set(&feed.url.clone(), Ok(feed));
        self
    }

    pub(crate) fn fail(self, url: &str, message: &str) -> Self {
        self.set(url, Err(message.to_string()));
        self
    }

    pub(crate) fn hold(self, url: &str) -> Self {
        self.held
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Semaphore::new(0)));
        self
    }

    pub(crate) fn release_url(&self, url: &str) {
        if let Some(gate) = self.held.lock().unwrap().get(url) {
            gate.add_permits(1);
        }
    }

    pub(crate) fn set(&self, url: &str, answer: Result<Feed, String>) {
        self.answers.lock().unwrap().insert(url.to_string(), answer);
    }

    pub(crate) fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, url: &str, is_default: bool) -> Result<Feed, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), is_default));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let held = self.held.lock().unwrap().get(url).cloned();
        if let Some(gate) = held.as_ref().or(self.gate.as_ref()) {
            gate.acquire().await.unwrap().forget();
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let answer = self.answers.lock().unwrap().get(url).cloned();
        match answer {
            Some(Ok(mut feed)) => {
                feed.is_default = is_default;
                Ok(feed)
            }
            Some(Err(message)) => Err(FetchError::new(url, message)),
            None => Err(FetchError::new(url, "no canned answer")),
        }
    }
}

pub(crate) fn sample_feed(url: &str, title: &str, posts: &[&str]) -> Feed {
    let posts = posts
        .iter()
        .map(|title| {
            let mut post = Post::new(url, *title);
            post.link = Some(format!("{url}/{title}"));
            post
        })
        .collect();
    Feed::new(url, title).with_posts(posts)
}

/// Poll until `url` shows up in `cache`.
pub(crate) async fn wait_until_cached(cache: &crate::cache::FeedCache, url: &str) {
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while cache.get(url).await.is_none() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("feed never reached the cache");
}
