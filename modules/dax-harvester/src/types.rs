use chrono::{DateTime, Utc};
use twitter_client::Status;

/// A post as returned by the search capability. Lives for one run only.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub screen_name: String,
    pub location: String,
    pub verified: bool,
    pub follower_count: u64,
    pub text: String,
    pub full_text: String,
    pub retweeted: bool,
    pub retweet_count: u64,
    pub favorite_count: Option<u64>,
    pub hashtags: Vec<String>,
}

impl From<Status> for RawPost {
    fn from(status: Status) -> Self {
        let hashtags = status.hashtags();
        // Extended mode only sends full_text; compat mode only sends text.
        let full_text = status.content().unwrap_or_default().to_string();
        let text = status.text.unwrap_or_else(|| full_text.clone());

        Self {
            id: status.id,
            created_at: status.created_at,
            screen_name: status.user.screen_name,
            location: status.user.location.unwrap_or_default(),
            verified: status.user.verified,
            follower_count: status.user.followers_count,
            text,
            full_text,
            retweeted: status.retweeted,
            retweet_count: status.retweet_count,
            favorite_count: status.favorite_count,
            hashtags,
        }
    }
}

/// One row of `dax_tweets`. Written once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub screen_name: String,
    pub location: String,
    pub text: String,
    pub full_text: String,
    pub retweet: bool,
    pub verified: bool,
    pub retweet_count: i32,
    /// Comma-joined, no trailing comma, empty when the post had none.
    pub hashtags: String,
    pub favorite_count: i32,
    pub follower_count: i32,
}
