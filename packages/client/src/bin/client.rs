//! Terminal client for Sketchroom rooms.
//!
//! Joins one room, sends each input line as a chat message and prints the
//! events relayed by the hub. Slash commands send strokes, images, clear and
//! leave events. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval) and joins the room again.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sketchroom-client -- --room XJ4K --name alice
//! cargo run --bin sketchroom-client -- -r XJ4K -n bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use sketchroom_client::run_client;
use sketchroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sketchroom-client")]
#[command(about = "Terminal client for Sketchroom collaboration rooms", long_about = None)]
struct Args {
    /// Room code to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name shown to other members
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.room, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
