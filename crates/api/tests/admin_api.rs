//! Integration tests for the admin waitlist endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, post_json, send_admin, TEST_ADMIN_TOKEN};
use serde_json::json;
use sqlx::PgPool;

fn join_body(name: &str, email: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": email,
        "university": "NUST",
    })
}

async fn join(app: &axum::Router, name: &str, email: &str) -> i64 {
    let response = post_json(app.clone(), "/api/v1/waitlist", &join_body(name, email)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn admin_routes_require_the_admin_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    // No Authorization header.
    let response = common::get(app.clone(), "/api/v1/admin/waitlist").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong token.
    let response = send_admin(
        app,
        Method::GET,
        "/api/v1/admin/waitlist",
        None,
        "wrong-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_entries_returns_every_signup(pool: PgPool) {
    let app = common::build_test_app(pool);

    join(&app, "Ayesha", "a@lums.edu.pk").await;
    join(&app, "Bilal", "b@nust.edu.pk").await;

    let response = send_admin(
        app,
        Method::GET,
        "/api/v1/admin/waitlist",
        None,
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stats_aggregate_ledger_counters(pool: PgPool) {
    let app = common::build_test_app(pool);

    let first = join(&app, "Ayesha", "a@lums.edu.pk").await;
    join(&app, "Bilal", "b@nust.edu.pk").await;

    send_admin(
        app.clone(),
        Method::POST,
        "/api/v1/admin/waitlist/invite",
        Some(&json!({"ids": [first]})),
        TEST_ADMIN_TOKEN,
    )
    .await;

    let response = send_admin(
        app,
        Method::GET,
        "/api/v1/admin/waitlist/stats",
        None,
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total_signups"], 2);
    assert_eq!(data["waiting_count"], 1);
    assert_eq!(data["invited_count"], 1);
    assert_eq!(data["joined_count"], 0);
    assert_eq!(data["conversion_rate"], 0.0);
}

// ---------------------------------------------------------------------------
// Invite
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn invite_reports_updated_and_missing_ids(pool: PgPool) {
    let app = common::build_test_app(pool);

    let id = join(&app, "Ayesha", "a@lums.edu.pk").await;

    let response = send_admin(
        app,
        Method::POST,
        "/api/v1/admin/waitlist/invite",
        Some(&json!({"ids": [id, 99999]})),
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["invited"], json!([id]));
    assert_eq!(json["data"]["missing"], json!([99999]));
}

#[sqlx::test(migrations = "../../migrations")]
async fn invite_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let id = join(&app, "Ayesha", "a@lums.edu.pk").await;

    for _ in 0..2 {
        let response = send_admin(
            app.clone(),
            Method::POST,
            "/api/v1/admin/waitlist/invite",
            Some(&json!({"ids": [id]})),
            TEST_ADMIN_TOKEN,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let status: String = sqlx::query_scalar("SELECT status FROM waitlist_entries WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "invited");
}

#[sqlx::test(migrations = "../../migrations")]
async fn invite_with_no_ids_is_a_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_admin(
        app,
        Method::POST,
        "/api/v1/admin/waitlist/invite",
        Some(&json!({"ids": []})),
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Access level
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn set_access_level_updates_the_entry(pool: PgPool) {
    let app = common::build_test_app(pool);

    let id = join(&app, "Ayesha", "a@lums.edu.pk").await;

    let response = send_admin(
        app,
        Method::PUT,
        &format!("/api/v1/admin/waitlist/{id}/access-level"),
        Some(&json!({"access_level": "vip"})),
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["access_level"], "vip");
}

#[sqlx::test(migrations = "../../migrations")]
async fn set_access_level_on_unknown_entry_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_admin(
        app,
        Method::PUT,
        "/api/v1/admin/waitlist/99999/access-level",
        Some(&json!({"access_level": "early_access"})),
        TEST_ADMIN_TOKEN,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
async fn set_access_level_rejects_unknown_levels(pool: PgPool) {
    let app = common::build_test_app(pool);

    let id = join(&app, "Ayesha", "a@lums.edu.pk").await;

    let response = send_admin(
        app,
        Method::PUT,
        &format!("/api/v1/admin/waitlist/{id}/access-level"),
        Some(&json!({"access_level": "supreme"})),
        TEST_ADMIN_TOKEN,
    )
    .await;
    // Enum membership is enforced at deserialization.
    assert!(response.status().is_client_error());
}
