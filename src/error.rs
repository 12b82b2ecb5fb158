//! Crate-wide error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The exchange answered with an error payload or a malformed bar.
    #[error("Market data error: {0}")]
    MarketData(String),

    /// Not enough complete feature rows to train or predict.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Model store error: {0}")]
    Store(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
