//! Domain layer errors.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room code must not be empty")]
    EmptyRoomCode,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name is too long ({0} chars)")]
    DisplayNameTooLong(usize),
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
}

/// Errors raised while pushing events to connections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    EncodeFailed(String),
}
