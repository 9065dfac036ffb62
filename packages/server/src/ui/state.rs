//! Server state shared by all handlers.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ConnectParticipantUseCase, CountConnectionsUseCase, DisconnectParticipantUseCase,
    GetRoomsUseCase, RouteEventUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// RouteEventUseCase（イベント中継のユースケース）
    pub route_event_usecase: Arc<RouteEventUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// CountConnectionsUseCase（接続数取得のユースケース）
    pub count_connections_usecase: Arc<CountConnectionsUseCase>,
    /// 受信がこの時間途絶えた接続を閉じる（None なら閉じない）
    pub idle_timeout: Option<Duration>,
}
