use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Query parameters for `GET search/tweets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    /// Page size. The API caps this at 100.
    pub count: u32,
    /// Only return statuses with an id greater than this.
    pub since_id: u64,
    /// Only return statuses with an id less than or equal to this.
    pub max_id: Option<u64>,
}

impl SearchParams {
    /// Key/value pairs as they go on the query string (unencoded).
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("count", self.count.to_string()),
            ("since_id", self.since_id.to_string()),
            ("result_type", "recent".to_string()),
            ("tweet_mode", "extended".to_string()),
            ("include_entities", "true".to_string()),
        ];
        if let Some(max_id) = self.max_id {
            pairs.push(("max_id", max_id.to_string()));
        }
        pairs
    }
}

/// Envelope returned by `search/tweets.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
}

/// A single status (tweet).
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub id: u64,
    #[serde(deserialize_with = "twitter_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Present in compat mode only.
    pub text: Option<String>,
    /// Present when `tweet_mode=extended`.
    pub full_text: Option<String>,
    pub user: User,
    #[serde(default)]
    pub retweeted: bool,
    #[serde(default)]
    pub retweet_count: u64,
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub entities: Entities,
}

impl Status {
    /// Returns whichever text field is populated, preferring `full_text`.
    pub fn content(&self) -> Option<&str> {
        self.full_text.as_deref().or(self.text.as_deref())
    }

    /// Hashtag texts in the order they appear in the status.
    pub fn hashtags(&self) -> Vec<String> {
        self.entities.hashtags.iter().map(|h| h.text.clone()).collect()
    }
}

/// Author info nested inside a Status.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub screen_name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub followers_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hashtag {
    pub text: String,
}

/// Error body, e.g. `{"errors":[{"code":32,"message":"Could not authenticate you."}]}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Twitter renders timestamps as `Wed Oct 10 20:19:24 +0000 2018`.
fn twitter_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_str(&raw, "%a %b %d %H:%M:%S %z %Y")
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
