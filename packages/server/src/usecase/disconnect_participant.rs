//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時のルームからの削除と、残りのメンバーへの get-users 通知
//!
//! ### なぜこのテストが必要か
//! - 受信ループの終了と送信ループの終了の両方から呼ばれるため、冪等でなければならない
//! - 最後のメンバーが切断した場合にルームが削除されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加中の接続の切断と通知
//! - エッジケース：未参加の接続の切断、leave-room 後の切断、最後のメンバーの切断
//! - 異常系：二重切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, OutboundEvent, RoomRepository, SessionRepository,
};

use super::error::DisconnectError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// RoomRepository（Room Registry の抽象化）
    room_repository: Arc<dyn RoomRepository>,
    /// SessionRepository（セッション状態の抽象化）
    session_repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - get-users を通知した接続 ID リスト
    /// * `Err(DisconnectError)` - 既に切断処理済み
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Vec<ConnectionId>, DisconnectError> {
        // 1. セッションを削除（削除できた呼び出しだけが後続の処理を行う）
        let session = self
            .session_repository
            .remove(connection_id)
            .await
            .ok_or_else(|| DisconnectError::AlreadyDisconnected(connection_id.to_string()))?;

        // 2. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(connection_id).await;

        // 3. 参加中のルームから外す
        let Some(room_code) = session.room_code else {
            return Ok(Vec::new());
        };
        if !self.room_repository.leave(&room_code, connection_id).await {
            return Ok(Vec::new());
        }

        // 4. 残りのメンバーに get-users を通知
        let remaining: Vec<ConnectionId> = self
            .room_repository
            .members(&room_code)
            .await
            .into_iter()
            .collect();
        if remaining.is_empty() {
            return Ok(remaining);
        }
        if let Err(e) = self
            .message_pusher
            .broadcast(remaining.clone(), &OutboundEvent::GetUsers)
            .await
        {
            tracing::warn!(
                "Failed to notify room '{}' about disconnect of '{}': {}",
                room_code,
                connection_id,
                e
            );
        }

        Ok(remaining)
    }
}
