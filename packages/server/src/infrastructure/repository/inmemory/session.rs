//! InMemory Session Repository 実装

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    ConnectionId, DisplayName, RepositoryError, RoomCode, Session, SessionRepository,
};

/// インメモリ Session Repository 実装
///
/// 接続ごとのセッションを保持し、ドメイン層の SessionRepository trait を実装します。
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    /// Key: 接続 ID / Value: セッション
    sessions: DashMap<ConnectionId, Session>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: Session) {
        self.sessions.insert(session.connection_id, session);
    }

    async fn get(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions
            .get(connection_id)
            .map(|session| session.value().clone())
    }

    async fn bind(
        &self,
        connection_id: &ConnectionId,
        room_code: RoomCode,
        display_name: DisplayName,
    ) -> Result<(), RepositoryError> {
        let mut session = self
            .sessions
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(connection_id.to_string()))?;
        session.bind(room_code, display_name);
        Ok(())
    }

    async fn unbind(&self, connection_id: &ConnectionId) -> Option<RoomCode> {
        self.sessions
            .get_mut(connection_id)
            .and_then(|mut session| session.unbind())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.sessions
            .remove(connection_id)
            .map(|(_, session)| session)
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}
