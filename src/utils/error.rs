//! Error handling for shortfeed

use thiserror::Error;

/// A video item from the upstream API could not be normalized.
///
/// Only the identity and numeric fields (`id`, `duration`) and the structure
/// of the variants list are strict; everything else degrades to defaults.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed video record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Fetching a page of the feed failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to decode feed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Empty response body")]
    EmptyResponse,
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(DecodeError::Malformed(err))
    }
}

/// Reading or writing the durable key-value store failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}
