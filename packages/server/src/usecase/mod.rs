//! UseCase layer.
//!
//! - `connect_participant`: accept a connection (Connection Gateway, on connect)
//! - `route_event`: relay inbound events to their room (Event Router)
//! - `disconnect_participant`: clean up after a connection (Connection Gateway, on disconnect)
//! - `get_rooms`: read-only snapshot of the room registry
//! - `count_connections`: number of accepted connections, for the health endpoint

mod connect_participant;
mod count_connections;
mod disconnect_participant;
mod error;
mod get_rooms;
mod route_event;

pub use connect_participant::ConnectParticipantUseCase;
pub use count_connections::CountConnectionsUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{DisconnectError, RouteError};
pub use get_rooms::GetRoomsUseCase;
pub use route_event::RouteEventUseCase;
