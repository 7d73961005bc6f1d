use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, TributaryError};
use crate::app::FeedStore;
use crate::cache::FeedCache;
use crate::config::Config;
use crate::fetcher::{FeedFetcher, FeedLoader, HttpFetcher, ParallelFetcher};
use crate::normalizer::Normalizer;
use crate::repository::FeedRepository;
use crate::store::{KeyValueStore, SqliteKeyValueStore};

/// Wires storage, network and the feed store together.
pub struct AppContext {
    pub config: Config,
    pub repository: Arc<FeedRepository>,
    pub store: FeedStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.storage.path {
            Some(path) => path.clone(),
            None => Self::default_db_path()?,
        };

        let storage = Arc::new(SqliteKeyValueStore::new(&db_path)?);
        Self::with_storage(config, storage)
    }

    /// Backed by an in-memory SQLite database; nothing survives the process.
    pub fn in_memory(config: Config) -> Result<Self> {
        let storage = Arc::new(SqliteKeyValueStore::in_memory()?);
        Self::with_storage(config, storage)
    }

    pub fn with_storage(
        config: Config,
        storage: Arc<dyn KeyValueStore + Send + Sync>,
    ) -> Result<Self> {
        let transport = Arc::new(HttpFetcher::with_config(&config.fetch)?);
        let fetcher: Arc<dyn FeedFetcher + Send + Sync> =
            Arc::new(FeedLoader::new(transport, Arc::new(Normalizer::new())));
        let parallel_fetcher = ParallelFetcher::from_workers(fetcher, config.fetch.workers);

        let cache = Arc::new(FeedCache::new(storage));
        let repository = Arc::new(FeedRepository::new(
            parallel_fetcher,
            cache,
            config.feeds.clone(),
        ));
        let store = FeedStore::new(repository.clone());

        Ok(Self {
            config,
            repository,
            store,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TributaryError::Config("Could not find data directory".into()))?;
        let tributary_dir = data_dir.join("tributary");
        std::fs::create_dir_all(&tributary_dir)?;
        Ok(tributary_dir.join("tributary.db"))
    }
}
