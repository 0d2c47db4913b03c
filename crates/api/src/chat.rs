//! WebSocket chat relay.
//!
//! Each room is a `tokio::sync::broadcast` channel living in this process.
//! Messages are relayed to everyone connected to the same room, including
//! the sender; nothing is persisted.

#![allow(missing_docs)]

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{error, info, warn};

use crate::middleware::AppState;

/// Chat connection query parameters.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    /// Access token for authentication.
    #[serde(rename = "i")]
    pub token: String,
    /// Room name to join.
    pub room: String,
}

/// A message relayed to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    pub room: String,
    pub user_id: String,
    pub username: String,
    pub message: String,
    pub sent_at: String,
}

/// Client-to-server chat message.
#[derive(Debug, Deserialize)]
pub struct ClientMessage {
    pub message: String,
}

/// Shared state for chat rooms.
#[derive(Clone)]
pub struct ChatState {
    rooms: Arc<RwLock<HashMap<String, broadcast::Sender<ChatEvent>>>>,
}

impl ChatState {
    /// Create a new chat state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get or create the broadcast channel for a room.
    pub async fn room(&self, name: &str) -> broadcast::Sender<ChatEvent> {
        if let Some(tx) = self.rooms.read().await.get(name) {
            return tx.clone();
        }

        let mut rooms = self.rooms.write().await;
        rooms
            .entry(name.to_string())
            .or_insert_with(|| broadcast::channel(256).0)
            .clone()
    }

    /// Drop a room's channel once its last subscriber is gone.
    ///
    /// Callers must drop their receiver before releasing, or the room is
    /// kept alive.
    pub async fn release(&self, name: &str) {
        let mut rooms = self.rooms.write().await;
        let empty = rooms.get(name).is_some_and(|tx| tx.receiver_count() == 0);
        if empty {
            rooms.remove(name);
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

/// WebSocket handler for chat.
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<ChatQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, query, state))
}

/// Handle a chat connection.
async fn handle_socket(socket: WebSocket, query: ChatQuery, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Chat requires authentication; close unauthenticated sockets
    let user = match state.account_service.authenticate_by_token(&query.token).await {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "Chat auth failed");
            let _ = sender
                .send(Message::Close(Some(CloseFrame {
                    code: 4401,
                    reason: "Unauthorized".into(),
                })))
                .await;
            return;
        }
    };

    info!(user_id = %user.id, room = %query.room, "Chat connection established");

    let tx = state.chat.room(&query.room).await;
    let mut rx = tx.subscribe();

    loop {
        tokio::select! {
            // Incoming messages from this client
            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(client_msg) => {
                                let event = ChatEvent {
                                    room: query.room.clone(),
                                    user_id: user.id.clone(),
                                    username: user.username.clone(),
                                    message: client_msg.message,
                                    sent_at: chrono::Utc::now().to_rfc3339(),
                                };
                                // Fails only when the room has no receivers,
                                // but this socket subscribes before sending
                                let _ = tx.send(event);
                            }
                            Err(e) => {
                                warn!(error = %e, "Failed to parse chat message");
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!(user_id = %user.id, "Chat client closed connection");
                        break;
                    }
                    Ok(Message::Ping(data)) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Chat socket error");
                        break;
                    }
                }
            }

            // Events relayed from the room
            Ok(event) = rx.recv() => {
                let json = serde_json::to_string(&event).unwrap_or_default();
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(rx);
    state.chat.release(&query.room).await;

    info!(user_id = %user.id, room = %query.room, "Chat connection closed");
}
