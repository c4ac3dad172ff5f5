//! Hourly harvester for `#DAX` tweets.
//!
//! Walks the Twitter search API page by page, projects each post into a
//! `dax_tweets` row, drops ids that are already stored, and inserts the rest
//! one at a time.

pub mod codec;
pub mod config;
pub mod dedup;
pub mod error;
pub mod harvest;
pub mod persister;
pub mod projector;
pub mod scheduler;
pub mod store;
pub mod traits;
pub mod types;
pub mod walker;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::Config;
pub use error::{HarvestError, Result};
pub use harvest::{Harvester, RunStats, SEARCH_TERM};
pub use store::PgTweetStore;
pub use traits::{SearchRequest, TweetSearch, TweetStore};
pub use types::{RawPost, StoredRecord};
pub use walker::{PageWalker, Walk};
