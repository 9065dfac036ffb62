//! Domain logic for client-side operations.
//!
//! Pure functions and values with no I/O, so they can be tested directly.

use sketchroom_server::domain::{DisplayName, RoomCode};

use crate::error::ClientError;

/// The room this client joins and the name it joins under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub room_code: RoomCode,
    pub display_name: DisplayName,
}

impl Identity {
    /// Validate the room code and display name with the same rules the hub applies.
    pub fn new(room_code: String, display_name: String) -> Result<Self, ClientError> {
        let room_code =
            RoomCode::new(room_code).map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        let display_name = DisplayName::new(display_name)
            .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        Ok(Self {
            room_code,
            display_name,
        })
    }

    /// Prompt shown before each input line, e.g. `alice@XJ4K> `
    pub fn prompt(&self) -> String {
        format!("{}@{}> ", self.display_name, self.room_code)
    }
}

/// How a session ended without a connection error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// `/quit`, Ctrl+C or Ctrl+D
    Quit,
    /// `/leave` was sent to the hub
    Left,
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidIdentity), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidIdentity(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that ended the session
/// * `current_attempt` - The number of reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
