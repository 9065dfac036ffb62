//! UseCase: イベント中継処理（Event Router）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteEventUseCase::execute() メソッド
//! - 受信イベントごとの中継先（送信者除外 / 送信者を含む全員 / 単一宛先）と参加・退出
//!
//! ### なぜこのテストが必要か
//! - 中継のセマンティクス（エコー抑制、全員配信、キャッチアップ要求）はハブの中核
//! - 未参加の送信者からのイベントが漏れないことを保証
//! - 送信者ごとの順序が保たれることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：join → drawing / image-updated / send-message / leave-room
//! - 異常系：未参加ルームへの送信、二重 join、未知の接続
//! - エッジケース：別ルームへの分離、最後のメンバーの退出

use std::sync::Arc;

use crate::domain::{
    ConnectionId, InboundEvent, MembershipChange, MessagePushError, MessagePusher, OutboundEvent,
    RoomRepository, SessionRepository,
};

use super::error::RouteError;

/// イベント中継のユースケース
pub struct RouteEventUseCase {
    /// RoomRepository（Room Registry の抽象化）
    room_repository: Arc<dyn RoomRepository>,
    /// SessionRepository（セッション状態の抽象化）
    session_repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RouteEventUseCase {
    /// 新しい RouteEventUseCase を作成
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

    /// イベント中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - イベントを送信した接続の ID
    /// * `event` - 受信イベント（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 中継先の接続 ID リスト
    /// * `Err(RouteError)` - イベントを破棄した理由
    pub async fn execute(
        &self,
        sender: ConnectionId,
        event: InboundEvent,
    ) -> Result<Vec<ConnectionId>, RouteError> {
        let session = self
            .session_repository
            .get(&sender)
            .await
            .ok_or_else(|| RouteError::UnknownConnection(sender.to_string()))?;

        let route = event.into_route(session.display_name.as_ref());

        // 1. 前提条件のチェック
        match &route.membership {
            MembershipChange::Join(_) => {
                if let Some(current) = session.room_code {
                    return Err(RouteError::AlreadyJoined(current));
                }
            }
            MembershipChange::Leave | MembershipChange::Keep => {
                if !session.is_member_of(&route.room_code) {
                    return Err(RouteError::NotAMember(route.room_code));
                }
            }
        }

        // 2. 参加（セッションを先に紐付けてから Room Registry に追加）
        if let MembershipChange::Join(display_name) = &route.membership {
            self.session_repository
                .bind(&sender, route.room_code.clone(), display_name.clone())
                .await?;
            let members = self.room_repository.join(&route.room_code, sender).await;
            tracing::info!(
                "Connection '{}' joined room '{}' as '{}' ({} member(s))",
                sender,
                route.room_code,
                display_name,
                members.len()
            );
        }

        // 3. 中継先を選んでファンアウト
        let members = self.room_repository.members(&route.room_code).await;
        let targets = route.fan_out.targets(members, &sender);
        let relayed = self.relay(&targets, &route.outbound).await;

        // 4. 退出（中継の成否にかかわらず行う）
        if route.membership == MembershipChange::Leave {
            self.room_repository.leave(&route.room_code, &sender).await;
            self.session_repository.unbind(&sender).await;
            tracing::info!("Connection '{}' left room '{}'", sender, route.room_code);
        }

        relayed?;
        Ok(targets)
    }

    /// 中継先へ送信する
    ///
    /// 中継先が一つだけなら単一宛先の送信（push_to）、複数ならブロードキャストを使う。
    /// どちらの場合も、切断済みの接続への送信失敗は中継全体の失敗にはしない。
    async fn relay(
        &self,
        targets: &[ConnectionId],
        outbound: &[OutboundEvent],
    ) -> Result<(), RouteError> {
        match targets {
            [] => {}
            [target] => {
                for event in outbound {
                    match self.message_pusher.push_to(target, event).await {
                        Ok(()) => {}
                        Err(e @ MessagePushError::EncodeFailed(_)) => return Err(e.into()),
                        Err(e) => {
                            tracing::warn!(
                                "Failed to push '{}' to connection '{}': {}",
                                event.name(),
                                target,
                                e
                            );
                        }
                    }
                }
            }
            _ => {
                for event in outbound {
                    self.message_pusher
                        .broadcast(targets.to_vec(), event)
                        .await?;
                }
            }
        }
        Ok(())
    }
}
