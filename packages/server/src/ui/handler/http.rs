//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomSummaryDto},
    ui::state::AppState,
};
use sketchroom_shared::time::timestamp_to_rfc3339;

/// Health check endpoint, with the number of open connections
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let connections = state.count_connections_usecase.execute().await;

    Json(HealthDto {
        status: "ok".to_string(),
        connections,
    })
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            member_count: room.member_count(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            room_code: room.code.into_string(),
        })
        .collect();

    Json(room_summaries)
}
