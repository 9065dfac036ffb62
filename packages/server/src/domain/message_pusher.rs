//! MessagePusher trait 定義
//!
//! 接続へのイベント送信（通知）のインターフェース。
//! 送信手段（WebSocket など）の具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, OutboundEvent};

/// 接続ごとの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 接続へのイベント送信
///
/// 送信はノンブロッキングでなければならない。
/// 遅い接続や切断済みの接続が他の接続への配信を止めてはならない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除（以降の送信は全て破棄される）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信し、配信できた数を返す
    ///
    /// 一部の接続への送信失敗は許容し、残りの接続への配信を続ける。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &OutboundEvent,
    ) -> Result<usize, MessagePushError>;
}
