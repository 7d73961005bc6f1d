//! # Tributary
//!
//! An offline-first RSS/Atom reading list.
//!
//! ## Architecture
//!
//! ```text
//! FeedStore → FeedRepository → ParallelFetcher → FeedLoader → Normalizer
//!                   └──────────→ FeedCache → KeyValueStore (SQLite)
//! ```
//!
//! Feeds are served from the cache and only fetched when the cache is empty
//! or a refresh is forced. Every fetched feed is written through to storage
//! as soon as it arrives.
//!
//! ## Quick Start
//!
//! ```bash
//! # Load the default feeds
//! tributary refresh
//!
//! # Add a feed
//! tributary add https://blog.rust-lang.org/feed.xml
//!
//! # Newest posts across all feeds
//! tributary posts
//! ```

/// Application wiring, errors and the feed state store.
///
/// - [`FeedStore`](app::FeedStore): single-writer state container
/// - [`FeedAction`](app::FeedAction): intents accepted by the store
/// - [`AppContext`](app::AppContext): builds the whole stack from a [`Config`](config::Config)
pub mod app;

/// Write-through feed cache over a key-value substrate.
pub mod cache;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/tributary/config.toml`.
pub mod config;

/// Core domain models: [`Feed`](domain::Feed), [`Post`](domain::Post),
/// [`FeedState`](domain::FeedState).
pub mod domain;

/// Fetching feeds over HTTP, one at a time or fanned out.
///
/// - [`Transport`](fetcher::Transport): raw bytes for a URL
/// - [`FeedFetcher`](fetcher::FeedFetcher): a parsed feed for a URL
/// - [`ParallelFetcher`](fetcher::ParallelFetcher): concurrent fetching with an optional cap
pub mod fetcher;

/// Converts RSS and Atom documents into [`Feed`](domain::Feed)s.
pub mod normalizer;

/// Reconciles the network with the cache.
pub mod repository;

/// Durable key-value storage.
pub mod store;
