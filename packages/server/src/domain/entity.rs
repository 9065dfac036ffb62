//! Entities of the collaboration hub.

use std::collections::HashSet;

use super::value_object::{ConnectionId, DisplayName, RoomCode, Timestamp};

/// Per-connection state
///
/// Created unbound when the connection is accepted. `room_code` is `Some`
/// exactly while the connection is a member of that room in the room
/// registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub display_name: Option<DisplayName>,
    pub room_code: Option<RoomCode>,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(connection_id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            connection_id,
            display_name: None,
            room_code: None,
            connected_at,
        }
    }

    /// Whether the session is currently joined to a room
    pub fn is_bound(&self) -> bool {
        self.room_code.is_some()
    }

    /// Whether the session is joined to the given room
    pub fn is_member_of(&self, room_code: &RoomCode) -> bool {
        self.room_code.as_ref() == Some(room_code)
    }

    /// Bind the session to a room under the given display name
    pub fn bind(&mut self, room_code: RoomCode, display_name: DisplayName) {
        self.room_code = Some(room_code);
        self.display_name = Some(display_name);
    }

    /// Unbind the session, returning the room it was joined to
    pub fn unbind(&mut self) -> Option<RoomCode> {
        self.room_code.take()
    }
}

/// A collaboration room and its current members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: RoomCode,
    pub members: HashSet<ConnectionId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(code: RoomCode, created_at: Timestamp) -> Self {
        Self {
            code,
            members: HashSet::new(),
            created_at,
        }
    }

    /// Add a member. Returns `false` if it was already present.
    pub fn add_member(&mut self, connection_id: ConnectionId) -> bool {
        self.members.insert(connection_id)
    }

    /// Remove a member. Returns `false` if it was not present.
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        self.members.remove(connection_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
