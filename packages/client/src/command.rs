//! Input line parsing.
//!
//! Plain text is a chat message and blank lines are skipped. Lines starting
//! with `/` are commands:
//!
//! | input            | frame sent      |
//! |------------------|-----------------|
//! | `hello`          | `send-message`  |
//! | `/draw <text>`   | `drawing`       |
//! | `/image <text>`  | `image-updated` |
//! | `/clear`         | `remove-all`    |
//! | `/leave`         | `leave-room`    |
//! | `/quit`          | nothing         |

use serde_json::json;
use sketchroom_server::infrastructure::dto::websocket::{
    DrawingPayload, EventFrame, ImageUpdatedPayload, JoinRoomPayload, RoomPayload,
    SendMessagePayload, event_name,
};

use crate::{domain::Identity, error::ClientError};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Draw(String),
    Image(String),
    Clear,
    Leave,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line, which sends nothing.
    pub fn parse(line: &str) -> Result<Option<Self>, ClientError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        Self::parse_non_blank(line).map(Some)
    }

    fn parse_non_blank(line: &str) -> Result<Self, ClientError> {
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Say(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg.is_empty()) {
            ("draw", false) => Ok(Self::Draw(arg.to_string())),
            ("image", false) => Ok(Self::Image(arg.to_string())),
            ("draw" | "image", true) => Err(ClientError::InvalidCommand(format!(
                "/{} needs an argument",
                name
            ))),
            ("clear", _) => Ok(Self::Clear),
            ("leave", _) => Ok(Self::Leave),
            ("quit", _) => Ok(Self::Quit),
            _ => Err(ClientError::InvalidCommand(format!("unknown command /{}", name))),
        }
    }

    /// Build the frame to send, or `None` for commands that stay local.
    pub fn to_frame(&self, identity: &Identity) -> Option<EventFrame> {
        let room_code = identity.room_code.as_str().to_string();
        let frame = match self {
            Self::Say(message) => EventFrame::new(
                event_name::SEND_MESSAGE,
                json!(SendMessagePayload {
                    room_code,
                    display_name: Some(identity.display_name.as_str().to_string()),
                    message: message.clone(),
                }),
            ),
            Self::Draw(text) => EventFrame::new(
                event_name::DRAWING,
                json!(DrawingPayload {
                    room_code,
                    stroke_data: json!({ "text": text }),
                }),
            ),
            Self::Image(text) => EventFrame::new(
                event_name::IMAGE_UPDATED,
                json!(ImageUpdatedPayload {
                    room_code,
                    image: json!(text),
                }),
            ),
            Self::Clear => EventFrame::new(event_name::REMOVE_ALL, json!(RoomPayload { room_code })),
            Self::Leave => EventFrame::new(event_name::LEAVE_ROOM, json!(RoomPayload { room_code })),
            Self::Quit => return None,
        };
        Some(frame)
    }
}

/// The `join-room` frame sent right after every (re)connect
pub fn join_frame(identity: &Identity) -> EventFrame {
    EventFrame::new(
        event_name::JOIN_ROOM,
        json!(JoinRoomPayload {
            display_name: identity.display_name.as_str().to_string(),
            room_code: identity.room_code.as_str().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("XJ4K".to_string(), "alice".to_string()).unwrap()
    }

    #[test]
    fn test_plain_text_is_a_chat_message() {
        // テスト項目: スラッシュで始まらない行はチャットメッセージになる
        // given (前提条件):
        let line = "  hello there  ";

        // when (操作):
        let command = Command::parse(line).unwrap();

        // then (期待する結果):
        assert_eq!(command, Some(Command::Say("hello there".to_string())));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        // テスト項目: 空行や空白のみの行はコマンドにならず、何も送信されない
        // given (前提条件):
        let lines = ["", "   ", "\t\n"];

        for line in lines {
            // when (操作):
            let command = Command::parse(line);

            // then (期待する結果):
            assert_eq!(command, Ok(None), "line: {:?}", line);
        }
    }

    #[test]
    fn test_parse_commands() {
        // テスト項目: 各コマンドが正しく解釈される
        // given (前提条件):
        let cases = [
            ("/draw line1", Command::Draw("line1".to_string())),
            ("/image  cat.png ", Command::Image("cat.png".to_string())),
            ("/clear", Command::Clear),
            ("/leave", Command::Leave),
            ("/quit", Command::Quit),
        ];

        for (line, expected) in cases {
            // when (操作):
            let command = Command::parse(line).unwrap();

            // then (期待する結果):
            assert_eq!(command, Some(expected), "line: {}", line);
        }
    }

    #[test]
    fn test_draw_without_argument_is_rejected() {
        // テスト項目: 引数のない /draw はエラーになる
        // given (前提条件):
        let line = "/draw";

        // when (操作):
        let result = Command::parse(line);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidCommand(_))));
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "/dance";

        // when (操作):
        let result = Command::parse(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ClientError::InvalidCommand("unknown command /dance".to_string()))
        );
    }

    #[test]
    fn test_say_frame_carries_display_name() {
        // テスト項目: チャットメッセージは表示名付きの send-message になる
        // given (前提条件):
        let command = Command::Say("hi".to_string());

        // when (操作):
        let frame = command.to_frame(&identity()).unwrap();

        // then (期待する結果):
        assert_eq!(frame.event_name, "send-message");
        assert_eq!(
            frame.payload,
            json!({"roomCode": "XJ4K", "displayName": "alice", "message": "hi"})
        );
    }

    #[test]
    fn test_draw_frame_wraps_text_as_stroke() {
        // テスト項目: /draw はテキストを strokeData に包んだ drawing になる
        // given (前提条件):
        let command = Command::Draw("line1".to_string());

        // when (操作):
        let frame = command.to_frame(&identity()).unwrap();

        // then (期待する結果):
        assert_eq!(frame.event_name, "drawing");
        assert_eq!(
            frame.payload,
            json!({"roomCode": "XJ4K", "strokeData": {"text": "line1"}})
        );
    }

    #[test]
    fn test_quit_sends_nothing() {
        // テスト項目: /quit はフレームを送らない
        // given (前提条件):
        let command = Command::Quit;

        // when (操作):
        let frame = command.to_frame(&identity());

        // then (期待する結果):
        assert_eq!(frame, None);
    }

    #[test]
    fn test_join_frame() {
        // テスト項目: join-room フレームにルームコードと表示名が入る
        // given (前提条件):
        let identity = identity();

        // when (操作):
        let frame = join_frame(&identity);

        // then (期待する結果):
        assert_eq!(
            frame,
            EventFrame::new(
                "join-room",
                json!({"displayName": "alice", "roomCode": "XJ4K"})
            )
        );
    }
}
