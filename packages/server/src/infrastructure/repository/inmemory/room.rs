//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//!
//! ルームごとの join / leave は `DashMap` のエントリ API を通して行うため、
//! 同じルームへの変更はシャードロックで直列化されます。
//! 「メンバー削除」と「空になったルームの削除」も同じロックの中で行うので、
//! 削除直後に別の接続が join しても、その join が失われることはありません。

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{ConnectionId, Room, RoomCode, RoomRepository, Timestamp};

/// インメモリ Room Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    /// Key: ルームコード / Value: ルーム
    rooms: DashMap<RoomCode, Room>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(
        &self,
        room_code: &RoomCode,
        connection_id: ConnectionId,
    ) -> HashSet<ConnectionId> {
        let mut room = self
            .rooms
            .entry(room_code.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_code);
                Room::new(room_code.clone(), Timestamp::now())
            });

        if !room.add_member(connection_id) {
            tracing::debug!(
                "Connection '{}' is already a member of room '{}'",
                connection_id,
                room_code
            );
        }

        room.members.clone()
    }

    async fn leave(&self, room_code: &RoomCode, connection_id: &ConnectionId) -> bool {
        let mut removed = false;

        let deleted = self.rooms.remove_if_mut(room_code, |_, room| {
            removed = room.remove_member(connection_id);
            room.is_empty()
        });

        if deleted.is_some() {
            tracing::info!("Room '{}' is empty and has been deleted", room_code);
        }

        removed
    }

    async fn members(&self, room_code: &RoomCode) -> HashSet<ConnectionId> {
        self.rooms
            .get(room_code)
            .map(|room| room.members.clone())
            .unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<Room> {
        self.rooms.iter().map(|entry| entry.value().clone()).collect()
    }
}
