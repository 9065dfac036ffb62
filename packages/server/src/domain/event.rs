//! Inbound and outbound events and the dispatch table between them.
//!
//! Every inbound event maps to exactly one [`Route`]: the room it targets, the
//! membership change it causes, the fan-out strategy, and the outbound events
//! relayed to the audience. The router executes routes generically, so all
//! relay semantics live in [`InboundEvent::into_route`].
//!
//! Payloads the hub does not interpret (canvas data, images, strokes) are
//! carried as raw JSON values. The hub never merges them: whatever was relayed
//! last is what receivers render.

use serde_json::Value;

use super::value_object::{ConnectionId, DisplayName, RoomCode};

/// Event received from a connection
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Join a room under a display name
    JoinRoom {
        room_code: RoomCode,
        display_name: DisplayName,
    },
    /// Full canvas state pushed by a member
    UpdatedCanvas { room_code: RoomCode, image_data: Value },
    /// Reference image swapped by a member
    ImageUpdated { room_code: RoomCode, image: Value },
    /// Incremental stroke
    Drawing {
        room_code: RoomCode,
        stroke_data: Value,
    },
    LeaveRoom { room_code: RoomCode },
    /// Ask every other member to drop out of the room
    RemoveAll { room_code: RoomCode },
    SendMessage {
        room_code: RoomCode,
        display_name: Option<DisplayName>,
        message: String,
    },
}

/// Event pushed to a connection
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    /// Ask the receiver to re-announce itself to the room
    GetUsers,
    /// Ask the receiver to resend its canvas state
    GetCanvas,
    UpdateCanvas { image_data: Value },
    GetImage { image: Value },
    Drawing {
        room_code: RoomCode,
        stroke_data: Value,
    },
    RemoveFromRoom,
    ReceiveMessage {
        display_name: Option<DisplayName>,
        message: String,
    },
}

/// Audience of a relay, relative to the room's member set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    /// Every member except the sender (echo suppression)
    ExcludeSender,
    /// Every member, the sender included
    IncludeAll,
}

/// Membership transition caused by an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipChange {
    /// Bind the unbound sender to the room before relaying
    Join(DisplayName),
    /// Remove the sender from the room after relaying
    Leave,
    /// Sender must already be a member; membership is unchanged
    Keep,
}

/// What the router does with one inbound event
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub room_code: RoomCode,
    pub membership: MembershipChange,
    pub fan_out: FanOut,
    pub outbound: Vec<OutboundEvent>,
}

impl InboundEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom { .. } => "join-room",
            Self::UpdatedCanvas { .. } => "updated-canvas",
            Self::ImageUpdated { .. } => "image-updated",
            Self::Drawing { .. } => "drawing",
            Self::LeaveRoom { .. } => "leave-room",
            Self::RemoveAll { .. } => "remove-all",
            Self::SendMessage { .. } => "send-message",
        }
    }

    pub fn room_code(&self) -> &RoomCode {
        match self {
            Self::JoinRoom { room_code, .. }
            | Self::UpdatedCanvas { room_code, .. }
            | Self::ImageUpdated { room_code, .. }
            | Self::Drawing { room_code, .. }
            | Self::LeaveRoom { room_code }
            | Self::RemoveAll { room_code }
            | Self::SendMessage { room_code, .. } => room_code,
        }
    }

    /// Map the event to its route.
    ///
    /// `sender_name` is the display name recorded in the sender's session; it
    /// is attached to chat messages that do not carry their own.
    pub fn into_route(self, sender_name: Option<&DisplayName>) -> Route {
        match self {
            Self::JoinRoom {
                room_code,
                display_name,
            } => Route {
                room_code,
                membership: MembershipChange::Join(display_name),
                fan_out: FanOut::ExcludeSender,
                outbound: vec![OutboundEvent::GetUsers, OutboundEvent::GetCanvas],
            },
            Self::UpdatedCanvas {
                room_code,
                image_data,
            } => Route::keep(
                room_code,
                FanOut::ExcludeSender,
                OutboundEvent::UpdateCanvas { image_data },
            ),
            Self::ImageUpdated { room_code, image } => Route::keep(
                room_code,
                FanOut::IncludeAll,
                OutboundEvent::GetImage { image },
            ),
            Self::Drawing {
                room_code,
                stroke_data,
            } => Route::keep(
                room_code.clone(),
                FanOut::ExcludeSender,
                OutboundEvent::Drawing {
                    room_code,
                    stroke_data,
                },
            ),
            Self::LeaveRoom { room_code } => Route {
                room_code,
                membership: MembershipChange::Leave,
                fan_out: FanOut::ExcludeSender,
                outbound: vec![OutboundEvent::GetUsers],
            },
            Self::RemoveAll { room_code } => Route::keep(
                room_code,
                FanOut::ExcludeSender,
                OutboundEvent::RemoveFromRoom,
            ),
            Self::SendMessage {
                room_code,
                display_name,
                message,
            } => Route::keep(
                room_code,
                FanOut::ExcludeSender,
                OutboundEvent::ReceiveMessage {
                    display_name: display_name.or_else(|| sender_name.cloned()),
                    message,
                },
            ),
        }
    }
}

impl Route {
    fn keep(room_code: RoomCode, fan_out: FanOut, outbound: OutboundEvent) -> Self {
        Self {
            room_code,
            membership: MembershipChange::Keep,
            fan_out,
            outbound: vec![outbound],
        }
    }
}

impl OutboundEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetUsers => "get-users",
            Self::GetCanvas => "get-canvas",
            Self::UpdateCanvas { .. } => "update-canvas",
            Self::GetImage { .. } => "get-image",
            Self::Drawing { .. } => "drawing",
            Self::RemoveFromRoom => "remove-from-room",
            Self::ReceiveMessage { .. } => "receive-message",
        }
    }
}

impl FanOut {
    /// Select the relay audience from a room's members.
    pub fn targets<I>(self, members: I, sender: &ConnectionId) -> Vec<ConnectionId>
    where
        I: IntoIterator<Item = ConnectionId>,
    {
        match self {
            Self::ExcludeSender => members.into_iter().filter(|id| id != sender).collect(),
            Self::IncludeAll => members.into_iter().collect(),
        }
    }
}
