//! Conversion logic between wire frames and domain events.
//!
//! Decoding is all-or-nothing: an unknown event name, a missing field or an
//! invalid room code rejects the whole frame.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::domain::{DisplayName, InboundEvent, OutboundEvent, RoomCode, ValueObjectError};
use crate::infrastructure::dto::websocket::{
    DrawingPayload, EventFrame, ImageUpdatedPayload, JoinRoomPayload, ReceiveMessagePayload,
    RoomPayload, SendMessagePayload, UpdatedCanvasPayload, event_name,
};

/// Reasons an inbound text frame is dropped
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not a valid event frame: {0}")]
    InvalidFrame(#[source] serde_json::Error),

    #[error("unknown inbound event '{0}'")]
    UnknownEvent(String),

    #[error("invalid payload for '{event}': {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value in '{event}': {source}")]
    InvalidValue {
        event: String,
        #[source]
        source: ValueObjectError,
    },
}

/// Decode one inbound text frame into a domain event.
pub fn decode_frame(text: &str) -> Result<InboundEvent, DecodeError> {
    let frame: EventFrame = serde_json::from_str(text).map_err(DecodeError::InvalidFrame)?;
    InboundEvent::try_from(frame)
}

/// Encode one outbound event as a text frame.
pub fn encode_event(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    let frame = EventFrame::try_from(event)?;
    serde_json::to_string(&frame)
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<EventFrame> for InboundEvent {
    type Error = DecodeError;

    fn try_from(frame: EventFrame) -> Result<Self, Self::Error> {
        let EventFrame {
            event_name: name,
            payload,
        } = frame;

        match name.as_str() {
            event_name::JOIN_ROOM => {
                let p: JoinRoomPayload = parse_payload(&name, payload)?;
                Ok(Self::JoinRoom {
                    room_code: room_code(&name, p.room_code)?,
                    display_name: display_name(&name, p.display_name)?,
                })
            }
            event_name::UPDATED_CANVAS => {
                let p: UpdatedCanvasPayload = parse_payload(&name, payload)?;
                Ok(Self::UpdatedCanvas {
                    room_code: room_code(&name, p.room_code)?,
                    image_data: p.image_data,
                })
            }
            event_name::IMAGE_UPDATED => {
                let p: ImageUpdatedPayload = parse_payload(&name, payload)?;
                Ok(Self::ImageUpdated {
                    room_code: room_code(&name, p.room_code)?,
                    image: p.image,
                })
            }
            event_name::DRAWING => {
                let p: DrawingPayload = parse_payload(&name, payload)?;
                Ok(Self::Drawing {
                    room_code: room_code(&name, p.room_code)?,
                    stroke_data: p.stroke_data,
                })
            }
            event_name::LEAVE_ROOM => {
                let p: RoomPayload = parse_payload(&name, payload)?;
                Ok(Self::LeaveRoom {
                    room_code: room_code(&name, p.room_code)?,
                })
            }
            event_name::REMOVE_ALL => {
                let p: RoomPayload = parse_payload(&name, payload)?;
                Ok(Self::RemoveAll {
                    room_code: room_code(&name, p.room_code)?,
                })
            }
            event_name::SEND_MESSAGE => {
                let p: SendMessagePayload = parse_payload(&name, payload)?;
                Ok(Self::SendMessage {
                    room_code: room_code(&name, p.room_code)?,
                    display_name: p
                        .display_name
                        .map(|value| display_name(&name, value))
                        .transpose()?,
                    message: p.message,
                })
            }
            _ => Err(DecodeError::UnknownEvent(name)),
        }
    }
}

fn parse_payload<T: DeserializeOwned>(
    event: &str,
    payload: serde_json::Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::InvalidPayload {
        event: event.to_string(),
        source,
    })
}

fn room_code(event: &str, value: String) -> Result<RoomCode, DecodeError> {
    RoomCode::new(value).map_err(|source| DecodeError::InvalidValue {
        event: event.to_string(),
        source,
    })
}

fn display_name(event: &str, value: String) -> Result<DisplayName, DecodeError> {
    DisplayName::new(value).map_err(|source| DecodeError::InvalidValue {
        event: event.to_string(),
        source,
    })
}

// ========================================
// Domain → DTO
// ========================================

impl TryFrom<&OutboundEvent> for EventFrame {
    type Error = serde_json::Error;

    fn try_from(event: &OutboundEvent) -> Result<Self, Self::Error> {
        let name = event.name();
        let frame = match event {
            OutboundEvent::GetUsers | OutboundEvent::GetCanvas | OutboundEvent::RemoveFromRoom => {
                EventFrame::empty(name)
            }
            OutboundEvent::UpdateCanvas { image_data } => EventFrame::new(name, image_data.clone()),
            OutboundEvent::GetImage { image } => EventFrame::new(name, image.clone()),
            OutboundEvent::Drawing {
                room_code,
                stroke_data,
            } => with_payload(
                name,
                &DrawingPayload {
                    room_code: room_code.as_str().to_string(),
                    stroke_data: stroke_data.clone(),
                },
            )?,
            OutboundEvent::ReceiveMessage {
                display_name,
                message,
            } => with_payload(
                name,
                &ReceiveMessagePayload {
                    display_name: display_name.as_ref().map(ToString::to_string),
                    message: message.clone(),
                },
            )?,
        };
        Ok(frame)
    }
}

fn with_payload<T: Serialize>(name: &str, payload: &T) -> Result<EventFrame, serde_json::Error> {
    Ok(EventFrame::new(name, serde_json::to_value(payload)?))
}
