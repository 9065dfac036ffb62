//! Event formatting utilities for client display.

use serde_json::Value;
use sketchroom_server::infrastructure::dto::websocket::{
    DrawingPayload, EventFrame, ReceiveMessagePayload, event_name,
};
use sketchroom_shared::time::timestamp_to_rfc3339;

const RULE: &str = "------------------------------------------------------------";

/// Event formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format one text frame received from the hub
    ///
    /// Frames that are not valid event frames are shown raw.
    pub fn format_text(text: &str) -> String {
        match serde_json::from_str::<EventFrame>(text) {
            Ok(frame) => Self::format_event(&frame),
            Err(_) => Self::format_raw_message(text),
        }
    }

    /// Format a decoded event frame
    pub fn format_event(frame: &EventFrame) -> String {
        match frame.event_name.as_str() {
            event_name::RECEIVE_MESSAGE => {
                match serde_json::from_value::<ReceiveMessagePayload>(frame.payload.clone()) {
                    Ok(p) => Self::format_chat_message(p.display_name.as_deref(), &p.message),
                    Err(_) => Self::format_unknown(frame),
                }
            }
            event_name::DRAWING => {
                match serde_json::from_value::<DrawingPayload>(frame.payload.clone()) {
                    Ok(p) => format!("\n~ stroke: {}\n", describe(&p.stroke_data)),
                    Err(_) => Self::format_unknown(frame),
                }
            }
            event_name::GET_IMAGE => format!("\n* image set to {}\n", describe(&frame.payload)),
            event_name::UPDATE_CANVAS => {
                format!("\n* canvas replaced ({})\n", describe(&frame.payload))
            }
            event_name::GET_USERS => "\n= room membership changed\n".to_string(),
            event_name::GET_CANVAS => "\n= a new member asked for the canvas\n".to_string(),
            event_name::REMOVE_FROM_ROOM => "\n! canvas cleared\n".to_string(),
            _ => Self::format_unknown(frame),
        }
    }

    /// Format a chat message
    pub fn format_chat_message(from: Option<&str>, content: &str) -> String {
        format!(
            "\n\n{}\n@{}: {}\n{}\n",
            RULE,
            from.unwrap_or("(anonymous)"),
            content,
            RULE
        )
    }

    /// Format a confirmation message after sending
    ///
    /// # Arguments
    ///
    /// * `sent_at` - Unix timestamp when the frame was sent (milliseconds)
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        format!("sent at {}\n", timestamp_to_rfc3339(sent_at))
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    fn format_unknown(frame: &EventFrame) -> String {
        format!("\n← {}: {}\n", frame.event_name, frame.payload)
    }
}

/// Strings are shown bare; any other JSON value as compact JSON.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
