//! Error types for the trivia game client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server turned the request down
    #[error("Server rejected the request: {0}")]
    Rejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server response did not have the expected shape
    #[error("Invalid server response: {0}")]
    Protocol(String),
}
