//! UseCase layer errors.

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, RoomCode};

/// Reasons an inbound event is dropped by the router
///
/// None of these are reported back to the sender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("connection '{0}' has no session")]
    UnknownConnection(String),

    #[error("connection is already joined to room '{0}'")]
    AlreadyJoined(RoomCode),

    #[error("sender is not a member of room '{0}'")]
    NotAMember(RoomCode),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// Disconnect errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection '{0}' is already disconnected")]
    AlreadyDisconnected(String),
}
