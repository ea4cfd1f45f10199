//! Handlers for the public `/waitlist` resource (join, status, leaderboard).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use unigo_core::error::CoreError;
use unigo_core::referral::referral_link;
use unigo_core::types::DbId;
use unigo_db::models::waitlist_entry::{CreateWaitlistEntry, LeaderboardEntry};
use unigo_events::{WaitlistEvent, EVENT_JOINED};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of leaderboard rows when the caller does not ask for one.
const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Upper bound on leaderboard rows per request.
const MAX_LEADERBOARD_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /waitlist`.
#[derive(Debug, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "University is required"))]
    pub university: String,
    pub phone: Option<String>,
    /// Another entry's referral code. Unknown codes are ignored.
    pub referral_code: Option<String>,
}

/// Successful signup response.
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub id: DbId,
    pub position: i64,
    pub referral_code: String,
    pub referral_link: String,
}

/// Query string for `GET /waitlist/status`.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: String,
}

/// Status response for one entry.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub id: DbId,
    pub position: i64,
    pub referral_code: String,
    pub referral_count: i32,
    pub status: String,
    /// Entries still waiting with a smaller position. Point-in-time read.
    pub total_ahead: i64,
    pub referral_link: String,
}

/// Query string for `GET /waitlist/leaderboard`.
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// Leaderboard response: top referrers plus the full signup count.
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_signups: i64,
}

// ---------------------------------------------------------------------------
// POST /waitlist
// ---------------------------------------------------------------------------

/// Join the waitlist.
///
/// Resolves the referral code (if any) to a referrer, inserts the entry,
/// then re-reads it to pick up the store-assigned position and referral
/// code. A duplicate email surfaces as `DUPLICATE_SIGNUP`.
pub async fn join(
    State(state): State<AppState>,
    Json(input): Json<JoinRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<JoinResponse>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    // An unknown referral code attaches no referrer rather than failing
    // the signup.
    let referrer_id = match input.referral_code.as_deref() {
        Some(code) => state.store.resolve_referrer(code).await?,
        None => None,
    };

    let create = CreateWaitlistEntry {
        name: input.name,
        email: input.email,
        university: input.university,
        phone: input.phone,
        referrer_id,
    };
    let id = state.store.insert(&create).await?;

    // Position and referral code are assigned store-side on insert, so
    // they are observed through a second read.
    let entry = state.store.find_by_id(id).await?.ok_or_else(|| {
        AppError::InternalError(format!("Waitlist entry {id} missing after insert"))
    })?;

    let event = WaitlistEvent::new(EVENT_JOINED, entry.id, entry.email.clone()).with_payload(
        serde_json::json!({
            "position": entry.position,
            "referrer_id": entry.referrer_id,
        }),
    );
    state.event_bus.publish(event);

    tracing::info!(
        entry_id = entry.id,
        position = entry.position,
        referred = entry.referrer_id.is_some(),
        "New waitlist signup"
    );

    let referral_link = referral_link(&state.config.public_url, &entry.referral_code);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: JoinResponse {
                id: entry.id,
                position: entry.position,
                referral_code: entry.referral_code,
                referral_link,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /waitlist/status
// ---------------------------------------------------------------------------

/// Look up an entry's status by email.
///
/// An unknown email is the distinct `NOT_ON_WAITLIST` condition so the
/// caller can offer the join flow instead of showing a failure.
pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<DataResponse<StatusResponse>>> {
    let entry = state
        .store
        .find_by_email(&query.email)
        .await?
        .ok_or(AppError::Core(CoreError::NotOnWaitlist))?;

    let total_ahead = state.store.count_ahead(entry.position).await?;

    let referral_link = referral_link(&state.config.public_url, &entry.referral_code);
    Ok(Json(DataResponse {
        data: StatusResponse {
            id: entry.id,
            position: entry.position,
            referral_code: entry.referral_code,
            referral_count: entry.referral_count,
            status: entry.status,
            total_ahead,
            referral_link,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /waitlist/leaderboard
// ---------------------------------------------------------------------------

/// Top referrers, ordered by referral count descending.
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<DataResponse<LeaderboardResponse>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    let entries = state.store.leaderboard(limit).await?;
    // The full count is a separate query, not derived from the bounded list.
    let total_signups = state.store.count_all().await?;

    Ok(Json(DataResponse {
        data: LeaderboardResponse {
            entries,
            total_signups,
        },
    }))
}
