//! In-process change feed for the waitlist ledger.
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`WaitlistEvent`] — the change-event envelope delivered to feed
//!   subscribers.

pub mod bus;

pub use bus::{
    EventBus, WaitlistEvent, EVENT_ACCESS_LEVEL_SET, EVENT_INVITED, EVENT_JOINED,
};
