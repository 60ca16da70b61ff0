pub mod admin;
pub mod handlers;
pub mod player;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Name of the player this connection acts as
    pub player: Option<String>,
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket connection request: player={:?}", params.player);

    ws.on_upgrade(move |socket| handle_socket(socket, params, state))
}

async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(msg) {
        Ok(json) => sender.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!("Failed to serialize message: {}", e);
            Ok(())
        }
    }
}

/// Tailor a broadcast for the connection acting as `player_name`
pub async fn view_for(
    state: &AppState,
    player_name: Option<&str>,
    msg: &ServerMessage,
) -> ServerMessage {
    let viewer = match player_name {
        Some(name) => state.engine.read().await.get_player(name).cloned(),
        None => None,
    };
    msg.redacted_for(viewer.as_ref())
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, params: WsQuery, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let conn_id = ulid::Ulid::new();
    let player_name = params
        .player
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    tracing::info!("WebSocket {} connected as {:?}", conn_id, player_name);

    // Subscribe before announcing presence so this client sees it too
    let mut broadcast_rx = state.broadcast.subscribe();

    let welcome = {
        let mut engine = state.engine.write().await;
        let presence = engine.track_online();
        state.broadcast_presence(presence);
        ServerMessage::Welcome {
            protocol: "1.0".to_string(),
            status: engine.status(),
            presence,
            player: player_name
                .as_deref()
                .and_then(|name| engine.get_player(name))
                .cloned(),
            server_now: chrono::Utc::now().to_rfc3339(),
        }
    };

    if send_message(&mut sender, &welcome).await.is_err() {
        tracing::error!("Failed to send welcome message");
    } else {
        loop {
            tokio::select! {
                broadcast_msg = broadcast_rx.recv() => {
                    let msg = match broadcast_msg {
                        Ok(msg) => msg,
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("WebSocket {} lagged, skipped {} messages", conn_id, skipped);
                            continue;
                        }
                        Err(RecvError::Closed) => break,
                    };

                    let view = view_for(&state, player_name.as_deref(), &msg).await;
                    if send_message(&mut sender, &view).await.is_err() {
                        break;
                    }
                }

                ws_msg = receiver.next() => {
                    match ws_msg {
                        Some(Ok(Message::Text(text))) => {
                            tracing::debug!("Received message: {}", text);

                            let response = match serde_json::from_str::<ClientMessage>(&text) {
                                Ok(client_msg) => {
                                    handlers::handle_message(client_msg, player_name.as_deref(), &state).await
                                }
                                Err(e) => {
                                    tracing::error!("Failed to parse client message: {}", e);
                                    Some(ServerMessage::error(
                                        "PARSE_ERROR",
                                        format!("Invalid message format: {}", e),
                                    ))
                                }
                            };

                            if let Some(response) = response {
                                if send_message(&mut sender, &response).await.is_err() {
                                    tracing::error!("Failed to send response");
                                    break;
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!("WebSocket {} closed", conn_id);
                            break;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if sender.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::error!("WebSocket error: {}", e);
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
    }

    {
        let mut engine = state.engine.write().await;
        let presence = engine.track_offline();
        state.broadcast_presence(presence);
    }

    tracing::info!("WebSocket {} disconnected ({:?})", conn_id, player_name);
}
