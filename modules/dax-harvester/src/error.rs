/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search failed: {0}")]
    Search(#[from] twitter_client::TwitterError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Pagination did not descend: next max_id {next} is not below previous {previous}")]
    Descent { previous: u64, next: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
