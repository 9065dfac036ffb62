//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One live room as listed by `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub room_code: String,
    pub member_count: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Response body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Accepted connections, joined to a room or not
    pub connections: usize,
}
