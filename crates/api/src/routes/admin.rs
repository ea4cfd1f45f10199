//! Route definitions for the admin surface.
//!
//! Mounted at `/admin` by `api_routes()`. Every handler requires the admin
//! bearer token.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin waitlist routes.
///
/// ```text
/// GET    /waitlist                       -> list_entries
/// GET    /waitlist/stats                 -> stats
/// POST   /waitlist/invite                -> invite_entries (bulk)
/// PUT    /waitlist/{id}/access-level     -> set_access_level
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", get(admin::list_entries))
        .route("/waitlist/stats", get(admin::stats))
        .route("/waitlist/invite", post(admin::invite_entries))
        .route("/waitlist/{id}/access-level", put(admin::set_access_level))
}
