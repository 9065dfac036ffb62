//! WebSocket hub server: axum router, connection handlers and shutdown.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, ServerConfig};
