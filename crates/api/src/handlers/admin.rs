//! Handlers for the `/admin/waitlist` resource.
//!
//! All endpoints require the admin bearer token via
//! [`RequireAdmin`](crate::middleware::admin::RequireAdmin).

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use unigo_core::error::CoreError;
use unigo_core::types::DbId;
use unigo_core::waitlist::AccessLevel;
use unigo_db::models::waitlist_entry::{WaitlistEntry, WaitlistStats};
use unigo_events::{WaitlistEvent, EVENT_ACCESS_LEVEL_SET, EVENT_INVITED};

use crate::error::{AppError, AppResult};
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/waitlist/invite`.
#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub ids: Vec<DbId>,
}

/// Per-id outcome of a bulk invite.
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    /// Ids whose status is now `invited` (including already-invited ones).
    pub invited: Vec<DbId>,
    /// Requested ids with no matching entry.
    pub missing: Vec<DbId>,
}

/// Request body for `PUT /admin/waitlist/{id}/access-level`.
#[derive(Debug, Deserialize)]
pub struct SetAccessLevelRequest {
    pub access_level: AccessLevel,
}

/// Admin dashboard stats, including the derived conversion rate.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: WaitlistStats,
    /// Percentage of signups that reached `joined`.
    pub conversion_rate: f64,
}

// ---------------------------------------------------------------------------
// GET /admin/waitlist
// ---------------------------------------------------------------------------

/// List every waitlist entry, newest first.
pub async fn list_entries(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<WaitlistEntry>>>> {
    let entries = state.store.list_all().await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// GET /admin/waitlist/stats
// ---------------------------------------------------------------------------

/// Aggregate counters over the whole ledger.
pub async fn stats(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> AppResult<Json<DataResponse<StatsResponse>>> {
    let stats = state.store.stats().await?;

    let conversion_rate = if stats.total_signups > 0 {
        (stats.joined_count as f64 / stats.total_signups as f64) * 100.0
    } else {
        0.0
    };

    Ok(Json(DataResponse {
        data: StatsResponse {
            stats,
            conversion_rate,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /admin/waitlist/invite
// ---------------------------------------------------------------------------

/// Transition the named entries to `invited`.
///
/// The update is a single statement: every existing id is set to `invited`
/// unconditionally (a no-op in effect for already-invited entries), and
/// ids without a row are reported back as `missing`.
pub async fn invite_entries(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(input): Json<InviteRequest>,
) -> AppResult<Json<DataResponse<InviteResponse>>> {
    if input.ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No entries selected".into(),
        )));
    }

    let updated = state.store.mark_invited(&input.ids).await?;

    let invited: Vec<DbId> = updated.iter().map(|e| e.id).collect();
    let missing: Vec<DbId> = input
        .ids
        .iter()
        .copied()
        .filter(|id| !invited.contains(id))
        .collect();

    for entry in &updated {
        let event = WaitlistEvent::new(EVENT_INVITED, entry.id, entry.email.clone());
        state.event_bus.publish(event);
    }

    tracing::info!(
        invited = invited.len(),
        missing = missing.len(),
        "Waitlist entries invited"
    );

    Ok(Json(DataResponse {
        data: InviteResponse { invited, missing },
    }))
}

// ---------------------------------------------------------------------------
// PUT /admin/waitlist/{id}/access-level
// ---------------------------------------------------------------------------

/// Set an entry's access level.
pub async fn set_access_level(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetAccessLevelRequest>,
) -> AppResult<Json<DataResponse<WaitlistEntry>>> {
    let entry = state
        .store
        .set_access_level(id, input.access_level)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "waitlist entry",
            id,
        }))?;

    let event = WaitlistEvent::new(EVENT_ACCESS_LEVEL_SET, entry.id, entry.email.clone())
        .with_payload(serde_json::json!({ "access_level": entry.access_level }));
    state.event_bus.publish(event);

    tracing::info!(entry_id = entry.id, access_level = %entry.access_level, "Access level updated");

    Ok(Json(DataResponse { data: entry }))
}
