//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::ConnectionId, infrastructure::dto::decode_frame, ui::state::AppState,
    usecase::RouteError,
};
use sketchroom_shared::time::timestamp_to_rfc3339;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded frames from the rx channel and pushes them to the WebSocket sender.
///
/// `closed` fires once the peer stops accepting frames, so the receive side can stop too.
///
/// The queue in front of this task is unbounded. A peer that keeps its TCP
/// connection open but stops reading is never dropped by this loop, and every
/// frame relayed to it, full `update-canvas` images included, stays queued in
/// memory until the peer disconnects or the idle timeout closes it.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    closed: oneshot::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
        let _ = closed.send(());
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive relayed frames.
    // Unbounded: see `pusher_loop` for the memory cost of a stalled reader.
    let (tx, rx) = mpsc::unbounded_channel();
    let (connection_id, connected_at) = state.connect_participant_usecase.execute(tx).await;
    tracing::info!(
        "Connection '{}' established at {}",
        connection_id,
        timestamp_to_rfc3339(connected_at.value())
    );

    let (sender, mut receiver) = socket.split();
    let (closed_tx, mut closed_rx) = oneshot::channel();
    let send_task = pusher_loop(rx, sender, closed_tx);

    // Frames are routed one at a time, in arrival order. The loop is never
    // cancelled in the middle of routing a frame.
    loop {
        let next = tokio::select! {
            _ = &mut closed_rx => {
                tracing::debug!("Outbound side of '{}' closed", connection_id);
                break;
            }
            next = next_frame(&mut receiver, state.idle_timeout) => next,
        };

        let msg = match next {
            Frame::Received(msg) => msg,
            Frame::Failed(e) => {
                tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            Frame::Idle(timeout) => {
                tracing::info!(
                    "Connection '{}' idle for {:?}, closing",
                    connection_id,
                    timeout
                );
                break;
            }
            Frame::Ended => break,
        };

        match msg {
            Message::Text(text) => route_frame(&state, connection_id, text.as_str()).await,
            Message::Binary(_) => {
                tracing::debug!("Ignored binary frame from '{}'", connection_id);
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }

    send_task.abort();

    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Ok(notified) => {
            tracing::info!(
                "Connection '{}' disconnected ({} member(s) notified)",
                connection_id,
                notified.len()
            );
        }
        Err(e) => {
            tracing::debug!("Skipped disconnect cleanup: {}", e);
        }
    }
}

enum Frame {
    Received(Message),
    Failed(axum::Error),
    Idle(Duration),
    Ended,
}

async fn next_frame(
    receiver: &mut SplitStream<WebSocket>,
    idle_timeout: Option<Duration>,
) -> Frame {
    let next = match idle_timeout {
        Some(limit) => match tokio::time::timeout(limit, receiver.next()).await {
            Ok(next) => next,
            Err(_) => return Frame::Idle(limit),
        },
        None => receiver.next().await,
    };

    match next {
        Some(Ok(msg)) => Frame::Received(msg),
        Some(Err(e)) => Frame::Failed(e),
        None => Frame::Ended,
    }
}

/// Decode one text frame and hand it to the router.
async fn route_frame(state: &AppState, connection_id: ConnectionId, text: &str) {
    let event = match decode_frame(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropped frame from '{}': {}", connection_id, e);
            return;
        }
    };
    let name = event.name();
    let room_code = event.room_code().clone();

    match state
        .route_event_usecase
        .execute(connection_id, event)
        .await
    {
        Ok(targets) => {
            tracing::debug!(
                "Relayed '{}' from '{}' in room '{}' to {} connection(s)",
                name,
                connection_id,
                room_code,
                targets.len()
            );
        }
        Err(e @ (RouteError::Push(_) | RouteError::Repository(_))) => {
            tracing::warn!("Failed to route '{}' from '{}': {}", name, connection_id, e);
        }
        Err(e) => {
            tracing::debug!(
                "Dropped '{}' from '{}' for room '{}': {}",
                name,
                connection_id,
                room_code,
                e
            );
        }
    }
}
