//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the hub behind the realtime feed: every ledger mutation
//! publishes a [`WaitlistEvent`], and any number of subscribers (the
//! WebSocket feed router, tests) receive each one independently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use unigo_core::types::DbId;

/// Published after a successful signup.
pub const EVENT_JOINED: &str = "waitlist.joined";

/// Published for each entry an admin invites.
pub const EVENT_INVITED: &str = "waitlist.invited";

/// Published when an admin changes an entry's access level.
pub const EVENT_ACCESS_LEVEL_SET: &str = "waitlist.access_level_set";

// ---------------------------------------------------------------------------
// WaitlistEvent
// ---------------------------------------------------------------------------

/// A change event on the waitlist ledger.
///
/// Carries the entry's email so feed subscriptions filtered to a single
/// entry can match without a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEvent {
    /// Dot-separated event name, e.g. `"waitlist.joined"`.
    pub event_type: String,

    /// The affected entry's database id.
    pub entry_id: DbId,

    /// The affected entry's email.
    pub email: String,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl WaitlistEvent {
    /// Create a new event with an empty payload.
    pub fn new(event_type: impl Into<String>, entry_id: DbId, email: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            entry_id,
            email: email.into(),
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`WaitlistEvent`].
pub struct EventBus {
    sender: broadcast::Sender<WaitlistEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// the feed delivers change notifications, it is not a durability
    /// mechanism.
    pub fn publish(&self, event: WaitlistEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<WaitlistEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
