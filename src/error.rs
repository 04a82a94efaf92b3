use thiserror::Error;

/// Errors that can occur while fetching recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Request failed, timed out, or came back with a non-success status
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream JSON did not have the expected shape
    #[error("Unexpected upstream response: {0}")]
    UpstreamFormat(String),

    /// A lookup by id returned no record
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// One request of a concurrent batch failed
    #[error("{failed} of {total} requests failed: {source}")]
    BatchFetch {
        failed: usize,
        total: usize,
        /// The first failure observed in the batch
        source: Box<BrowserError>,
    },

    /// Caller passed an argument that cannot be sent upstream
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl BrowserError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrowserError::NotFound(_))
    }
}

/// Errors raised by a persistent key-value store.
///
/// These never reach the user; callers log them and carry on.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
