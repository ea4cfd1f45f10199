//! Realtime feed over WebSocket.
//!
//! Clients subscribe to either all ledger changes (`waitlist-changes`) or
//! the changes for one entry (`waitlist-status` with an email). The
//! [`FeedRouter`](crate::feed::FeedRouter) forwards bus events to matching
//! subscribers.

pub mod handler;
pub mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::{FeedSubscription, WsManager};
