pub mod action;
pub mod context;
pub mod error;
pub mod feed_store;

pub use action::{FeedAction, FeedSideEffect};
pub use context::AppContext;
pub use error::{FetchError, Result, TributaryError};
pub use feed_store::FeedStore;
