// Seams between the harvest run and the outside world.
//
// TweetSearch: one page of the search API per call.
// TweetStore: full id read and single-row insert on dax_tweets.
//
// The run only sees these traits, so tests drive it with MockSearch and
// MockStore from `testing`: no network, no database.

use async_trait::async_trait;
use twitter_client::{SearchParams, TwitterClient};

use crate::error::Result;
use crate::types::{RawPost, StoredRecord};

/// Bounds for a single search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub count: u32,
    pub since_id: u64,
    /// Omitted on the first request of a walk.
    pub max_id: Option<u64>,
}

#[async_trait]
pub trait TweetSearch: Send + Sync {
    /// Return one page of posts matching the request. Empty means exhausted.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawPost>>;
}

#[async_trait]
pub trait TweetStore: Send + Sync {
    /// Every stored id, in its signed storage form.
    async fn stored_ids(&self) -> Result<Vec<i64>>;

    /// Insert a single record.
    async fn insert(&self, record: &StoredRecord) -> Result<()>;
}

#[async_trait]
impl TweetSearch for TwitterClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawPost>> {
        let params = SearchParams {
            query: request.query.clone(),
            count: request.count,
            since_id: request.since_id,
            max_id: request.max_id,
        };
        let statuses = self.search_tweets(&params).await?;
        Ok(statuses.into_iter().map(RawPost::from).collect())
    }
}
