use std::env;
use std::time::Duration;

use tracing::info;
use twitter_client::Credentials;

use crate::error::{HarvestError, Result};

/// Hourly, at minute 45 (seconds-first cron syntax).
pub const DEFAULT_SCHEDULE: &str = "0 45 * * * *";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Harvester configuration, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub twitter: Credentials,
    pub database_url: String,
    pub schedule: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| HarvestError::Config(format!("{key} environment variable is required")))
        };

        let twitter = Credentials {
            consumer_key: required("TWITTER_CONSUMER_KEY")?,
            consumer_secret: required("TWITTER_CONSUMER_SECRET")?,
            access_token: required("TWITTER_ACCESS_TOKEN")?,
            access_token_secret: required("TWITTER_ACCESS_TOKEN_SECRET")?,
        };
        let database_url = required("DATABASE_URL")?;

        let schedule = lookup("HARVEST_SCHEDULE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEDULE.to_string());

        let timeout_secs = match lookup("TWITTER_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                HarvestError::Config(format!("TWITTER_TIMEOUT_SECS must be a number, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            twitter,
            database_url,
            schedule,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Log the effective configuration with secrets masked.
    pub fn log_redacted(&self) {
        info!(
            consumer_key = %redact(&self.twitter.consumer_key),
            access_token = %redact(&self.twitter.access_token),
            database = %redact_url(&self.database_url),
            schedule = %self.schedule,
            timeout_secs = self.request_timeout.as_secs(),
            "Harvester configuration"
        );
    }
}

fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}***")
}

/// Keep scheme and host, drop credentials: `postgres://***@db:5432/tweets`.
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
