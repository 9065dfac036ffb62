//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::collections::HashSet;

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, RepositoryError, Room, RoomCode, Session};

/// Room Registry
///
/// ルームコードと参加中の接続 ID の集合を対応付ける。
/// ルームは最初の join で作成され、最後のメンバーが抜けた時点で削除される。
///
/// 同じルームへの join / leave はアトミックに直列化されなければならない。
/// 異なるルームへの操作は互いにブロックしない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームに参加する（冪等）。ルームが無ければ作成し、更新後のメンバー集合を返す
    async fn join(&self, room_code: &RoomCode, connection_id: ConnectionId)
    -> HashSet<ConnectionId>;

    /// ルームから退出する。実際に削除した場合 true を返す
    ///
    /// ルームやメンバーが存在しない場合は何もしない（切断との競合を許容）。
    /// 退出後にメンバーが空になればルームを削除する。
    async fn leave(&self, room_code: &RoomCode, connection_id: &ConnectionId) -> bool;

    /// ルームのメンバー集合を取得（存在しないルームは空集合）
    async fn members(&self, room_code: &RoomCode) -> HashSet<ConnectionId>;

    /// 存在する全てのルームのスナップショットを取得
    async fn rooms(&self) -> Vec<Room>;
}

/// Session State
///
/// 接続ごとのセッション（表示名・参加中のルーム）を保持する。
/// 接続をまたいで共有されることはない。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを登録
    async fn insert(&self, session: Session);

    /// セッションを取得
    async fn get(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// セッションをルームに紐付ける
    async fn bind(
        &self,
        connection_id: &ConnectionId,
        room_code: RoomCode,
        display_name: DisplayName,
    ) -> Result<(), RepositoryError>;

    /// セッションのルームへの紐付けを解除し、参加していたルームを返す
    async fn unbind(&self, connection_id: &ConnectionId) -> Option<RoomCode>;

    /// セッションを削除して返す
    ///
    /// 同じ接続に対して二回呼ばれた場合、二回目は None を返す。
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session>;

    /// 登録中のセッション数を取得
    async fn count(&self) -> usize;
}
