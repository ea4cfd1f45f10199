use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use unigo_core::types::Timestamp;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// What a feed connection asked to receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSubscription {
    /// Every ledger change (leaderboard and admin views).
    AllChanges,
    /// Only events concerning the entry with this email (status page).
    Status { email: String },
}

impl FeedSubscription {
    /// Whether an event tagged with `email` should reach this subscriber.
    pub fn matches(&self, email: &str) -> bool {
        match self {
            FeedSubscription::AllChanges => true,
            FeedSubscription::Status { email: wanted } => wanted == email,
        }
    }
}

/// Metadata for a single feed connection.
pub struct WsConnection {
    /// Active subscription, if the client has sent one. Connections
    /// without a subscription receive nothing but pings.
    pub subscription: Option<FeedSubscription>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active feed connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            subscription: None,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Replace a connection's subscription. `None` stops event delivery.
    ///
    /// Cancelling a subscription has no effect beyond this map: events
    /// simply stop being delivered.
    pub async fn set_subscription(&self, conn_id: &str, subscription: Option<FeedSubscription>) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.subscription = subscription;
        }
    }

    /// Send a message to every connection whose subscription matches the
    /// event's email.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    /// Returns the number of connections the message was sent to.
    pub async fn send_matching(&self, email: &str, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            let matches = conn
                .subscription
                .as_ref()
                .is_some_and(|sub| sub.matches(email));
            if matches {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Send a Ping frame to every connection.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
    }
}
