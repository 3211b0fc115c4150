use thiserror::Error;

/// Failure while fetching the article feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("feed endpoint answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("feed decoding error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid feed endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Failure while reading or writing the bookmark blob.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored bookmarks are not valid JSON: {0}")]
    Decode(serde_json::Error),
    #[error("failed to serialize bookmarks: {0}")]
    Encode(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
