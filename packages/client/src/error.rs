//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Room code or display name rejected before connecting
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Input line that is not a known command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
