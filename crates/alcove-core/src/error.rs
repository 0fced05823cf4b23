//! Error types for alcove-core

use thiserror::Error;

/// Result type alias using alcove-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in alcove-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Local database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote store rejected or failed a call
    #[error("Remote error: {0}")]
    Remote(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
