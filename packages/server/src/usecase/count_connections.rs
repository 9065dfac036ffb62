//! UseCase: 接続数取得処理

use std::sync::Arc;

use crate::domain::SessionRepository;

/// 接続数取得のユースケース
pub struct CountConnectionsUseCase {
    /// SessionRepository（セッション状態の抽象化）
    session_repository: Arc<dyn SessionRepository>,
}

impl CountConnectionsUseCase {
    /// 新しい CountConnectionsUseCase を作成
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    /// 受け付け済みの接続数（ルーム未参加の接続を含む）を取得
    pub async fn execute(&self) -> usize {
        self.session_repository.count().await
    }
}
