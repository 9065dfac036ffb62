//! InMemory Repository 実装
//!
//! どちらも `DashMap` をインメモリストアとして使用します。
//! ロックはシャード単位のため、異なるルーム・接続への操作は互いをブロックしません。

mod room;
mod session;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
