pub mod admin;
pub mod health;
pub mod waitlist;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                    realtime feed WebSocket
///
/// /waitlist                              join (POST, public)
/// /waitlist/status?email=                entry status (GET, public)
/// /waitlist/leaderboard?limit=           top referrers (GET, public)
///
/// /admin/waitlist                        list entries (admin only)
/// /admin/waitlist/stats                  aggregate counters
/// /admin/waitlist/invite                 bulk invite (POST)
/// /admin/waitlist/{id}/access-level      set access level (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Realtime feed WebSocket.
        .route("/ws", get(ws::ws_handler))
        // Public waitlist operations.
        .nest("/waitlist", waitlist::router())
        // Admin surface (token-gated).
        .nest("/admin", admin::router())
}
