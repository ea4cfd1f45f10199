use std::sync::Arc;

use unigo_db::{DbPool, WaitlistStore};
use unigo_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// The waitlist store. Handlers only see the trait, so the Postgres
    /// adapter stays swappable.
    pub store: Arc<dyn WaitlistStore>,
    /// Database connection pool (health checks).
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket feed connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Event bus for publishing ledger change events.
    pub event_bus: Arc<EventBus>,
}
