//! Sketchroom collaboration hub.
//!
//! Relays canvas, stroke and chat events between the members of each room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchroom-server
//! cargo run --bin sketchroom-server -- --host 0.0.0.0 --port 3000 --idle-timeout-secs 300
//! ```

use std::{collections::HashMap, sync::Arc, time::Duration};

use clap::Parser;
use sketchroom_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::{Server, ServerConfig},
    usecase::{
        ConnectParticipantUseCase, CountConnectionsUseCase, DisconnectParticipantUseCase,
        GetRoomsUseCase, RouteEventUseCase,
    },
};
use sketchroom_shared::logger::setup_logger;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "sketchroom-server")]
#[command(about = "Real-time collaboration hub for shared canvases", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Close connections that send nothing for this many seconds
    #[arg(long)]
    idle_timeout_secs: Option<u64>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            idle_timeout: args.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repositories (in-memory)
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let session_repository = Arc::new(InMemorySessionRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(RwLock::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        session_repository.clone(),
        message_pusher.clone(),
    ));
    let route_event_usecase = Arc::new(RouteEventUseCase::new(
        room_repository.clone(),
        session_repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        room_repository.clone(),
        session_repository.clone(),
        message_pusher,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(room_repository));
    let count_connections_usecase = Arc::new(CountConnectionsUseCase::new(session_repository));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        route_event_usecase,
        disconnect_participant_usecase,
        get_rooms_usecase,
        count_connections_usecase,
        args.into(),
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
