//! WebSocket client session management.

use futures_util::{Sink, SinkExt, StreamExt};
use sketchroom_server::infrastructure::dto::websocket::EventFrame;
use sketchroom_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::{Command, join_frame},
    domain::{Identity, SessionEnd},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Run one connection: join the room, then relay input lines and print inbound events.
///
/// # Returns
///
/// * `Ok(SessionEnd)` - the user quit or left the room
/// * `Err(ClientError::ConnectionError)` - the connection failed or was closed by the hub
pub async fn run_client_session(
    url: &str,
    identity: &Identity,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to hub!");

    let (mut write, mut read) = ws_stream.split();
    let prompt = identity.prompt();

    send_frame(&mut write, &join_frame(identity)).await?;
    println!(
        "\nYou are '{}' in room '{}'. Type messages and press Enter to send.\n\
         Commands: /draw <text>, /image <text>, /clear, /leave, /quit\n",
        identity.display_name, identity.room_code
    );
    redisplay_prompt(&prompt);

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                // Input thread gone: Ctrl+C or Ctrl+D
                let Some(line) = line else {
                    return Ok(SessionEnd::Quit);
                };

                let command = match Command::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => {
                        redisplay_prompt(&prompt);
                        continue;
                    }
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(&prompt);
                        continue;
                    }
                };

                let Some(frame) = command.to_frame(identity) else {
                    return Ok(SessionEnd::Quit);
                };
                send_frame(&mut write, &frame).await?;

                if command == Command::Leave {
                    // Close politely; the session is over either way
                    let _ = write.close().await;
                    return Ok(SessionEnd::Left);
                }

                print!("{}", MessageFormatter::format_sent_confirmation(now_millis()));
                redisplay_prompt(&prompt);
            }
            message = read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        print!("{}", MessageFormatter::format_text(text.as_str()));
                        redisplay_prompt(&prompt);
                    }
                    Some(Ok(Message::Binary(data))) => {
                        print!("{}", MessageFormatter::format_binary_message(data.len()));
                        redisplay_prompt(&prompt);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Hub closed the connection");
                        return Err(ClientError::ConnectionError(
                            "Connection closed by hub".to_string(),
                        ));
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

async fn send_frame<S>(write: &mut S, frame: &EventFrame) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = serde_json::to_string(frame)
        .map_err(|e| ClientError::ConnectionError(format!("Failed to encode frame: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
