//! Repository 実装
//!
//! - `inmemory`: プロセス内のみで完結する実装（永続化なし）

pub mod inmemory;

pub use inmemory::{InMemoryRoomRepository, InMemorySessionRepository};
