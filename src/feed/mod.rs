pub mod fetcher;
pub mod item;
pub mod parser;

pub use fetcher::{FeedFetcher, FetchError, HttpFeedFetcher};
pub use item::FeedItem;
pub use parser::parse_feed;
