use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::manager::{FeedSubscription, WsManager};

/// Feed channel carrying every ledger change.
const CHANNEL_CHANGES: &str = "waitlist-changes";

/// Feed channel carrying the changes for a single entry.
const CHANNEL_STATUS: &str = "waitlist-status";

/// Inbound client message on the feed socket.
#[derive(Debug, Deserialize)]
struct ClientMessage {
    action: String,
    channel: Option<String>,
    email: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `WsManager` and
/// managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

/// Manage a single feed connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes subscribe/unsubscribe messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Feed WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = ws_manager.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                handle_client_message(&conn_id, text.as_str(), &ws_manager).await;
            }
            Ok(_msg) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Feed WebSocket disconnected");
}

/// Dispatch a parsed client message: subscribe or unsubscribe.
async fn handle_client_message(conn_id: &str, text: &str, ws_manager: &WsManager) {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed feed message");
            return;
        }
    };

    match msg.action.as_str() {
        "subscribe" => {
            let subscription = match (msg.channel.as_deref(), msg.email) {
                (Some(CHANNEL_CHANGES), _) => Some(FeedSubscription::AllChanges),
                (Some(CHANNEL_STATUS), Some(email)) => Some(FeedSubscription::Status { email }),
                (channel, _) => {
                    tracing::debug!(conn_id = %conn_id, ?channel, "Ignoring unknown feed channel");
                    return;
                }
            };
            tracing::debug!(conn_id = %conn_id, ?subscription, "Feed subscription set");
            ws_manager.set_subscription(conn_id, subscription).await;
        }
        "unsubscribe" => {
            ws_manager.set_subscription(conn_id, None).await;
            tracing::debug!(conn_id = %conn_id, "Feed subscription cleared");
        }
        other => {
            tracing::debug!(conn_id = %conn_id, action = other, "Ignoring unknown feed action");
        }
    }
}
