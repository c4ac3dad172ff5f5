//! Pure Twitter v1.1 REST client.
//!
//! A minimal client for the standard search endpoint, signed with OAuth 1.0a
//! user-context credentials.
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_client::{Credentials, SearchParams, TwitterClient};
//!
//! let client = TwitterClient::new(credentials);
//!
//! let page = client
//!     .search_tweets(&SearchParams { query: "#DAX".into(), count: 100, since_id: 1, max_id: None })
//!     .await?;
//! for status in &page {
//!     println!("{} {}", status.id, status.content().unwrap_or(""));
//! }
//! ```

pub mod error;
mod oauth;
pub mod types;

pub use error::{Result, TwitterError};
pub use oauth::Credentials;
pub use types::{Entities, Hashtag, SearchParams, SearchResponse, Status, User};

use std::time::Duration;

use types::ErrorResponse;

const BASE_URL: &str = "https://api.twitter.com/1.1";

pub struct TwitterClient {
    client: reqwest::Client,
    credentials: Credentials,
    base_url: String,
}

impl TwitterClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Client whose requests fail with a network error after `timeout`.
    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            credentials,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (e.g. a local stub server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one page of `search/tweets`. An empty vector means the search is exhausted
    /// for the given bounds.
    pub async fn search_tweets(&self, params: &SearchParams) -> Result<Vec<Status>> {
        let url = format!("{}/search/tweets.json", self.base_url);
        let pairs = params.to_pairs();
        let auth = oauth::authorization_header(&self.credentials, "GET", &url, &pairs)?;

        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, oauth::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        tracing::debug!(
            query = %params.query,
            max_id = ?params.max_id,
            since_id = params.since_id,
            "Requesting search page"
        );

        let resp = self
            .client
            .get(format!("{url}?{query}"))
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let (code, message) = describe_error(&body);
            return Err(TwitterError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body = resp.text().await?;
        let page: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = page.statuses.len(), "Fetched search page");

        Ok(page.statuses)
    }
}

/// Prefer the API's structured error messages over the raw body. Returns the
/// first error code alongside the message.
fn describe_error(body: &str) -> (Option<i64>, String) {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => {
            let message = parsed
                .errors
                .iter()
                .map(|e| format!("{} (code {})", e.message, e.code))
                .collect::<Vec<_>>()
                .join("; ");
            (parsed.errors.first().map(|e| e.code), message)
        }
        _ => (None, body.to_string()),
    }
}
