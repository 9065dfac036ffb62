//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectParticipantUseCase, CountConnectionsUseCase, DisconnectParticipantUseCase,
    GetRoomsUseCase, RouteEventUseCase,
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Network and connection settings for the hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g., 8080)
    pub port: u16,
    /// Close a connection after this long without an inbound frame
    pub idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            idle_timeout: None,
        }
    }
}

/// WebSocket collaboration hub server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     route_event_usecase,
///     disconnect_participant_usecase,
///     get_rooms_usecase,
///     count_connections_usecase,
///     ServerConfig::default(),
/// );
/// server.run().await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// RouteEventUseCase（イベント中継のユースケース）
    route_event_usecase: Arc<RouteEventUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// CountConnectionsUseCase（接続数取得のユースケース）
    count_connections_usecase: Arc<CountConnectionsUseCase>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        route_event_usecase: Arc<RouteEventUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        count_connections_usecase: Arc<CountConnectionsUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            connect_participant_usecase,
            route_event_usecase,
            disconnect_participant_usecase,
            get_rooms_usecase,
            count_connections_usecase,
            config,
        }
    }

    /// Build the axum router with all endpoints
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase.clone(),
            route_event_usecase: self.route_event_usecase.clone(),
            disconnect_participant_usecase: self.disconnect_participant_usecase.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
            count_connections_usecase: self.count_connections_usecase.clone(),
            idle_timeout: self.config.idle_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the hub until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Sketchroom hub listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        match self.config.idle_timeout {
            Some(timeout) => tracing::info!("Idle connections close after {:?}", timeout),
            None => tracing::info!("Idle timeout disabled"),
        }
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
