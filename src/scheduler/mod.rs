pub mod manager;
pub mod scheduled_feed;

pub use manager::FeedManager;
pub use scheduled_feed::{CycleOutcome, ScheduledFeed};
