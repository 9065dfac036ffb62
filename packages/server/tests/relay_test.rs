//! Integration tests for the collaboration hub over real WebSocket connections.

use std::{collections::HashMap, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
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
use tokio::{net::TcpStream, sync::RwLock, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

/// How long to wait before concluding that no frame will arrive
const SILENCE: Duration = Duration::from_millis(300);

/// Helper struct to manage the in-process server lifecycle
struct TestServer {
    handle: JoinHandle<()>,
    port: u16,
}

impl TestServer {
    /// Start a hub on an ephemeral port
    async fn start() -> Self {
        Self::start_with(ServerConfig {
            port: 0,
            ..ServerConfig::default()
        })
        .await
    }

    async fn start_with(config: ServerConfig) -> Self {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(RwLock::new(
            HashMap::new(),
        ))));
        let server = Server::new(
            Arc::new(ConnectParticipantUseCase::new(
                session_repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(RouteEventUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher,
            )),
            Arc::new(GetRoomsUseCase::new(room_repository)),
            Arc::new(CountConnectionsUseCase::new(session_repository)),
            config,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let app = server.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestServer { handle, port }
    }

    /// Get the WebSocket URL for this server
    fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket client connection
struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url()).await.unwrap();
        TestClient { stream }
    }

    /// Connect and join a room, giving the hub time to register the membership
    async fn join(server: &TestServer, room_code: &str, display_name: &str) -> Self {
        let mut client = Self::connect(server).await;
        client
            .send(json!({
                "eventName": "join-room",
                "payload": {"roomCode": room_code, "displayName": display_name}
            }))
            .await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        client
    }

    async fn send(&mut self, frame: Value) {
        self.stream
            .send(Message::Text(frame.to_string().into()))
            .await
            .unwrap();
    }

    /// Receive the next text frame, or None if nothing arrives in time
    async fn recv(&mut self) -> Option<Value> {
        loop {
            let msg = tokio::time::timeout(SILENCE, self.stream.next())
                .await
                .ok()??
                .ok()?;
            if let Message::Text(text) = msg {
                return Some(serde_json::from_str(text.as_str()).unwrap());
            }
        }
    }

    /// Discard every frame that arrives within the silence window
    async fn drain(&mut self) {
        while self.recv().await.is_some() {}
    }

    async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックエンドポイントが ok と接続数 0 を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(server.http_url("/api/health")).await.unwrap();

    // then (期待する結果):
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok", "connections": 0}));
}

#[tokio::test]
async fn test_health_check_counts_open_connections() {
    // テスト項目: ヘルスチェックの接続数はルーム未参加の接続も含み、切断後に減る
    // given (前提条件):
    let server = TestServer::start().await;
    let alice = TestClient::join(&server, "XJ4K", "alice").await;
    let lurker = TestClient::connect(&server).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    // when (操作):
    let before: Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    alice.close().await;
    lurker.close().await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    let after: Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(before["connections"], 2);
    assert_eq!(after["connections"], 0);
}

#[tokio::test]
async fn test_drawing_reaches_peer_but_not_sender() {
    // テスト項目: drawing は他のメンバーに届き、送信者には届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;
    let mut bob = TestClient::join(&server, "XJ4K", "bob").await;
    alice.drain().await;

    // when (操作):
    alice
        .send(json!({
            "eventName": "drawing",
            "payload": {"roomCode": "XJ4K", "strokeData": {"stroke": "line1"}}
        }))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        Some(json!({
            "eventName": "drawing",
            "payload": {"roomCode": "XJ4K", "strokeData": {"stroke": "line1"}}
        }))
    );
    assert_eq!(alice.recv().await, None);
}

#[tokio::test]
async fn test_send_message_scenario() {
    // テスト項目: send-message は表示名とメッセージ付きで他のメンバーに届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;
    let mut bob = TestClient::join(&server, "XJ4K", "bob").await;
    alice.drain().await;

    // when (操作):
    bob.send(json!({
        "eventName": "send-message",
        "payload": {"roomCode": "XJ4K", "displayName": "bob", "message": "hi"}
    }))
    .await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        Some(json!({
            "eventName": "receive-message",
            "payload": {"displayName": "bob", "message": "hi"}
        }))
    );
    assert_eq!(bob.recv().await, None);
}

#[tokio::test]
async fn test_image_updated_reaches_sender_too() {
    // テスト項目: image-updated は送信者を含むルーム全員に get-image として届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;
    let mut bob = TestClient::join(&server, "XJ4K", "bob").await;
    alice.drain().await;

    // when (操作):
    alice
        .send(json!({
            "eventName": "image-updated",
            "payload": {"roomCode": "XJ4K", "image": "cat.png"}
        }))
        .await;

    // then (期待する結果):
    let expected = Some(json!({"eventName": "get-image", "payload": "cat.png"}));
    assert_eq!(alice.recv().await, expected);
    assert_eq!(bob.recv().await, expected);
}

#[tokio::test]
async fn test_join_asks_existing_members_for_catch_up() {
    // テスト項目: 新規参加時、既存メンバーだけが get-users と get-canvas を一度ずつ受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;

    // when (操作):
    let mut dave = TestClient::join(&server, "XJ4K", "dave").await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        Some(json!({"eventName": "get-users", "payload": {}}))
    );
    assert_eq!(
        alice.recv().await,
        Some(json!({"eventName": "get-canvas", "payload": {}}))
    );
    assert_eq!(alice.recv().await, None);
    assert_eq!(dave.recv().await, None);
}

#[tokio::test]
async fn test_disconnect_notifies_remaining_members() {
    // テスト項目: 切断すると残りのメンバーに get-users が一度だけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;
    let bob = TestClient::join(&server, "XJ4K", "bob").await;
    alice.drain().await;

    // when (操作):
    bob.close().await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        Some(json!({"eventName": "get-users", "payload": {}}))
    );
    assert_eq!(alice.recv().await, None);
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    // テスト項目: 別のルームのイベントは届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "R1", "alice").await;
    let mut charlie = TestClient::join(&server, "R2", "charlie").await;

    // when (操作):
    alice
        .send(json!({
            "eventName": "image-updated",
            "payload": {"roomCode": "R1", "image": "dog.png"}
        }))
        .await;

    // then (期待する結果):
    assert!(alice.recv().await.is_some());
    assert_eq!(charlie.recv().await, None);
}

#[tokio::test]
async fn test_malformed_frames_are_dropped_without_closing() {
    // テスト項目: 不正なフレームは破棄され、接続はそのまま使える
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = TestClient::join(&server, "XJ4K", "alice").await;
    let mut bob = TestClient::join(&server, "XJ4K", "bob").await;
    alice.drain().await;

    // when (操作):
    alice
        .stream
        .send(Message::Text("not json".to_string().into()))
        .await
        .unwrap();
    alice
        .send(json!({"eventName": "no-such-event", "payload": {}}))
        .await;
    alice
        .send(json!({"eventName": "drawing", "payload": {"roomCode": "XJ4K"}}))
        .await;
    alice
        .send(json!({
            "eventName": "drawing",
            "payload": {"roomCode": "XJ4K", "strokeData": {"stroke": "ok"}}
        }))
        .await;

    // then (期待する結果):
    let frame = bob.recv().await.unwrap();
    assert_eq!(frame["payload"]["strokeData"], json!({"stroke": "ok"}));
    assert_eq!(bob.recv().await, None);
}

#[tokio::test]
async fn test_rooms_endpoint_lists_live_rooms() {
    // テスト項目: ルーム一覧に参加者数付きで存在するルームが並ぶ
    // given (前提条件):
    let server = TestServer::start().await;
    let _alice = TestClient::join(&server, "beta", "alice").await;
    let _bob = TestClient::join(&server, "beta", "bob").await;
    let _charlie = TestClient::join(&server, "alpha", "charlie").await;

    // when (操作):
    let rooms: Vec<Value> = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[0]["roomCode"], "alpha");
    assert_eq!(rooms[0]["memberCount"], 1);
    assert_eq!(rooms[1]["roomCode"], "beta");
    assert_eq!(rooms[1]["memberCount"], 2);
    assert!(rooms[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    // テスト項目: アイドルタイムアウトを過ぎた接続は閉じられ、ルームから外れる
    // given (前提条件):
    let server = TestServer::start_with(ServerConfig {
        port: 0,
        idle_timeout: Some(Duration::from_millis(200)),
        ..ServerConfig::default()
    })
    .await;
    let _alice = TestClient::join(&server, "XJ4K", "alice").await;

    // when (操作):
    tokio::time::sleep(Duration::from_millis(600)).await;

    // then (期待する結果):
    let rooms: Vec<Value> = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rooms.is_empty());
}
