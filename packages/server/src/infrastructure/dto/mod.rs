//! Data Transfer Objects (DTOs) for the collaboration hub.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event frames and their payloads
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;

pub use conversion::{DecodeError, decode_frame, encode_event};
