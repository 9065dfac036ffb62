//! Value objects of the collaboration hub.
//!
//! Every value object validates its input on construction, so anything
//! holding a `RoomCode` or a `DisplayName` can rely on it being well-formed.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a display name in characters
pub const MAX_DISPLAY_NAME_LEN: usize = 64;

/// Opaque identity the hub assigns to each accepted connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random connection ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Key of one collaboration room
///
/// The code is opaque and kept byte-for-byte, so `"XJ4K"` and `" XJ4K"`
/// name two different rooms. Only the empty string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomCode);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied display name
///
/// The hub does not verify it against any user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyDisplayName);
        }
        let len = trimmed.chars().count();
        if len > MAX_DISPLAY_NAME_LEN {
            return Err(ValueObjectError::DisplayNameTooLong(len));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn now() -> Self {
        Self(sketchroom_shared::time::now_millis())
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_is_kept_verbatim() {
        // テスト項目: ルームコードは空白も含めてそのまま保持される
        // given (前提条件):
        let raw = "  XJ4K \n".to_string();

        // when (操作):
        let code = RoomCode::new(raw);

        // then (期待する結果):
        assert_eq!(code.unwrap().as_str(), "  XJ4K \n");
    }

    #[test]
    fn test_room_codes_differing_in_whitespace_are_distinct() {
        // テスト項目: 空白だけが異なるルームコードは別のルームを表す
        // given (前提条件):
        let plain = RoomCode::new("XJ4K".to_string()).unwrap();

        // when (操作):
        let padded = RoomCode::new(" XJ4K".to_string()).unwrap();

        // then (期待する結果):
        assert_ne!(plain, padded);
    }

    #[test]
    fn test_room_code_rejects_empty() {
        // テスト項目: 空のルームコードは拒否される
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = RoomCode::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomCode));
    }

    #[test]
    fn test_room_code_accepts_whitespace_and_long_codes() {
        // テスト項目: 空白のみや長いルームコードも不透明なキーとして受け入れられる
        // given (前提条件):
        let blank = "   ".to_string();
        let long = "x".repeat(65);

        // when (操作):
        let blank_code = RoomCode::try_from(blank);
        let long_code = RoomCode::try_from(long.clone());

        // then (期待する結果):
        assert_eq!(blank_code.unwrap().as_str(), "   ");
        assert_eq!(long_code.unwrap().as_str(), long);
    }

    #[test]
    fn test_display_name_counts_characters_not_bytes() {
        // テスト項目: 表示名の長さはバイト数ではなく文字数で判定される
        // given (前提条件):
        let raw = "あ".repeat(MAX_DISPLAY_NAME_LEN);

        // when (操作):
        let result = DisplayName::new(raw.clone());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), raw);
    }

    #[test]
    fn test_display_name_rejects_empty() {
        // テスト項目: 空の表示名は拒否される
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyDisplayName));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成された接続 ID は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
