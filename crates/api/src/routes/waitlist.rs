//! Route definitions for the public waitlist operations.
//!
//! Mounted at `/waitlist` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::waitlist;
use crate::state::AppState;

/// Public waitlist routes.
///
/// ```text
/// POST   /             -> join
/// GET    /status       -> status (by email)
/// GET    /leaderboard  -> leaderboard (top referrers)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(waitlist::join))
        .route("/status", get(waitlist::status))
        .route("/leaderboard", get(waitlist::leaderboard))
}
