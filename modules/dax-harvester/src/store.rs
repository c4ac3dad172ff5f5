//! Postgres persistence for harvested tweets.
//!
//! Every call checks a connection out of the pool for the duration of one
//! statement and hands it back on return, success or failure.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::codec;
use crate::error::Result;
use crate::traits::TweetStore;
use crate::types::StoredRecord;

#[derive(Clone)]
pub struct PgTweetStore {
    pool: PgPool,
}

impl PgTweetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool without connecting. Connection errors surface on first use,
    /// inside the run that needs the database.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl TweetStore for PgTweetStore {
    async fn stored_ids(&self) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT tweet_id FROM dax_tweets")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn insert(&self, r: &StoredRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO dax_tweets
                (tweet_id, tweet_created_at, screen_name, location, text, full_text,
                 retweet, verified, hashtags, retweet_count, favorite_count, follower_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(codec::encode(r.id))
        .bind(r.created_at)
        .bind(&r.screen_name)
        .bind(&r.location)
        .bind(&r.text)
        .bind(&r.full_text)
        .bind(r.retweet)
        .bind(r.verified)
        .bind(&r.hashtags)
        .bind(r.retweet_count)
        .bind(r.favorite_count)
        .bind(r.follower_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
