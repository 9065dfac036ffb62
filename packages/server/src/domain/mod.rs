//! Domain layer: value objects, entities, events and the interfaces the
//! use cases depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Room, Session};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::{FanOut, InboundEvent, MembershipChange, OutboundEvent, Route};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository};
pub use value_object::{ConnectionId, DisplayName, RoomCode, Timestamp};
