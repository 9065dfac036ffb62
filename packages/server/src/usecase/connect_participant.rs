//! UseCase: 接続受付処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, Session, SessionRepository, Timestamp,
};

/// 接続受付のユースケース
///
/// 接続に ID を割り当て、未参加のセッションと送信チャンネルを登録する。
pub struct ConnectParticipantUseCase {
    /// SessionRepository（セッション状態の抽象化）
    session_repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            session_repository,
            message_pusher,
        }
    }

    /// 接続受付を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 割り当てた接続 ID と接続時刻
    pub async fn execute(&self, sender: PusherChannel) -> (ConnectionId, Timestamp) {
        let connection_id = ConnectionId::generate();
        let connected_at = Timestamp::now();

        // 1. 未参加のセッションを作成
        self.session_repository
            .insert(Session::new(connection_id, connected_at))
            .await;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        (connection_id, connected_at)
    }
}
