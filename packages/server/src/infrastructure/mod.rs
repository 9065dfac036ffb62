//! Infrastructure layer: in-memory registries, WebSocket delivery and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
