//! WebSocket wire format.
//!
//! Every text frame is one [`EventFrame`]:
//!
//! ```json
//! { "eventName": "drawing", "payload": { "roomCode": "XJ4K", "strokeData": { "stroke": "line1" } } }
//! ```
//!
//! Outbound events without data carry an empty object as payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names used on the wire
pub mod event_name {
    pub const JOIN_ROOM: &str = "join-room";
    pub const GET_USERS: &str = "get-users";
    pub const GET_CANVAS: &str = "get-canvas";
    pub const UPDATED_CANVAS: &str = "updated-canvas";
    pub const UPDATE_CANVAS: &str = "update-canvas";
    pub const IMAGE_UPDATED: &str = "image-updated";
    pub const GET_IMAGE: &str = "get-image";
    pub const DRAWING: &str = "drawing";
    pub const LEAVE_ROOM: &str = "leave-room";
    pub const REMOVE_ALL: &str = "remove-all";
    pub const REMOVE_FROM_ROOM: &str = "remove-from-room";
    pub const SEND_MESSAGE: &str = "send-message";
    pub const RECEIVE_MESSAGE: &str = "receive-message";
}

/// One message on the socket, in either direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFrame {
    pub event_name: String,
    #[serde(default)]
    pub payload: Value,
}

impl EventFrame {
    pub fn new(event_name: impl Into<String>, payload: Value) -> Self {
        Self {
            event_name: event_name.into(),
            payload,
        }
    }

    /// Frame without data (`"payload": {}`)
    pub fn empty(event_name: impl Into<String>) -> Self {
        Self::new(event_name, Value::Object(serde_json::Map::new()))
    }
}

/// `join-room` payload (`username` is accepted as an alias of `displayName`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    #[serde(alias = "username")]
    pub display_name: String,
    pub room_code: String,
}

/// `updated-canvas` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedCanvasPayload {
    pub room_code: String,
    pub image_data: Value,
}

/// `image-updated` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdatedPayload {
    pub room_code: String,
    pub image: Value,
}

/// `drawing` payload, identical in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPayload {
    pub room_code: String,
    pub stroke_data: Value,
}

/// Payload of `leave-room` and `remove-all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub room_code: String,
}

/// `send-message` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub room_code: String,
    #[serde(default, alias = "username", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub message: String,
}

/// `receive-message` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessagePayload {
    pub display_name: Option<String>,
    pub message: String,
}
