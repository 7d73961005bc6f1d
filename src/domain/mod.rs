pub mod feed;
pub mod post;
pub mod state;

pub use feed::Feed;
pub use post::Post;
pub use state::FeedState;
