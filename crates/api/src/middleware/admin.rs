//! Admin authentication extractor.
//!
//! The admin surface is gated by a shared bearer token (`ADMIN_TOKEN`).
//! End-user authentication is delegated to the hosted auth service and is
//! not modeled here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use unigo_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Requires a valid admin bearer token. Rejects with 401/403 otherwise.
///
/// ```ignore
/// async fn admin_only(_admin: RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Fail closed when no token is configured.
        if state.config.admin_token.is_empty() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access is not configured".into(),
            )));
        }

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if token != state.config.admin_token {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin token".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}
