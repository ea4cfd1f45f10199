//! Event-to-feed routing.
//!
//! [`FeedRouter`] subscribes to the ledger event bus and forwards each
//! event, as a JSON text frame, to the WebSocket connections whose
//! subscription matches it.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use unigo_events::WaitlistEvent;

use crate::ws::WsManager;

/// Routes ledger change events to feed subscribers.
pub struct FeedRouter {
    ws_manager: Arc<WsManager>,
}

impl FeedRouter {
    /// Create a new router for the given connection manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and forwards each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](unigo_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<WaitlistEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Feed router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, feed router shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and push it to matching subscribers.
    async fn forward(&self, event: &WaitlistEvent) {
        let frame = serde_json::json!({
            "type": "waitlist_event",
            "event_type": event.event_type,
            "entry_id": event.entry_id,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let message = Message::Text(frame.to_string().into());

        let delivered = self.ws_manager.send_matching(&event.email, message).await;
        tracing::debug!(
            event_type = %event.event_type,
            entry_id = event.entry_id,
            delivered,
            "Forwarded waitlist event"
        );
    }
}
