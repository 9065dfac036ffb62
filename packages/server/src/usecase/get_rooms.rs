//! UseCase: ルーム一覧取得処理

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    room_repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    /// 存在する全てのルームをルームコード順で取得
    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = self.room_repository.rooms().await;
        rooms.sort_by(|a, b| a.code.cmp(&b.code));
        rooms
    }
}
