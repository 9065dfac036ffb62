//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - イベントのエンコードとクライアントへの送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、送信に使用します。
//! 送信はチャンネルへの enqueue のみで完了するため、遅い接続が
//! ファンアウトを止めることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, OutboundEvent, PusherChannel},
    infrastructure::dto::encode_event,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(RwLock::new(HashMap::new())));
///
/// pusher.register_client(connection_id, tx).await;
/// pusher.broadcast(targets, &OutboundEvent::GetCanvas).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: Arc<RwLock<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<RwLock<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

fn encode(event: &OutboundEvent) -> Result<String, MessagePushError> {
    encode_event(event).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.write().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.write().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let content = encode(event)?;
        let clients = self.clients.read().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed '{}' to connection '{}'",
            event.name(),
            connection_id
        );
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<usize, MessagePushError> {
        let content = encode(event)?;
        let clients = self.clients.read().await;
        let mut delivered = 0;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(content.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => tracing::warn!(
                        "Failed to push '{}' to connection '{}': {}",
                        event.name(),
                        target,
                        e
                    ),
                },
                None => tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                ),
            }
        }

        tracing::debug!("Broadcasted '{}' to {} connection(s)", event.name(), delivered);
        Ok(delivered)
    }
}
