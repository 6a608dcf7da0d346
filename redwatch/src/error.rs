//! Errors raised while talking to the Redis source.

use thiserror::Error;

/// Failure of a single call against a [`crate::client::RedisSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
    #[error("{0}")]
    Unavailable(String),
}

/// Why one poll cycle was abandoned. Rendered verbatim as the pane's error line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Error loading metrics: {0}")]
    Metrics(#[source] SourceError),
    #[error("Error loading Redis info: {0}")]
    Info(#[source] SourceError),
}
