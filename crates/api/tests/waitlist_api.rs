//! Integration tests for the public waitlist endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

fn join_body(name: &str, email: &str) -> serde_json::Value {
    json!({
        "name": name,
        "email": email,
        "university": "LUMS",
    })
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn join_returns_position_referral_code_and_link(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/waitlist",
        &join_body("Ayesha", "ayesha@lums.edu.pk"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];

    assert!(data["id"].is_i64());
    assert!(data["position"].as_i64().unwrap() >= 1);

    let code = data["referral_code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(
        data["referral_link"],
        format!("http://localhost:5173/waitlist?ref={code}")
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_positions_increase_in_signup_order(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut last_position = 0;
    for (name, email) in [
        ("Ayesha", "a@lums.edu.pk"),
        ("Bilal", "b@nust.edu.pk"),
        ("Chandra", "c@fast.edu.pk"),
    ] {
        let response = post_json(app.clone(), "/api/v1/waitlist", &join_body(name, email)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let position = body_json(response).await["data"]["position"]
            .as_i64()
            .unwrap();
        assert!(position > last_position);
        last_position = position;
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_rejects_invalid_input_before_any_store_write(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    // Single-character name.
    let response = post_json(
        app.clone(),
        "/api/v1/waitlist",
        &json!({"name": "A", "email": "a@lums.edu.pk", "university": "LUMS"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Malformed email.
    let response = post_json(
        app.clone(),
        "/api/v1/waitlist",
        &json!({"name": "Ayesha", "email": "not-an-email", "university": "LUMS"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing university.
    let response = post_json(
        app,
        "/api/v1/waitlist",
        &json!({"name": "Ayesha", "email": "a@lums.edu.pk", "university": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was written.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist_entries")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_email_returns_duplicate_signup(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = join_body("Ayesha", "ayesha@lums.edu.pk");
    let response = post_json(app.clone(), "/api/v1/waitlist", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(app, "/api/v1/waitlist", &body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "DUPLICATE_SIGNUP");
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_with_unknown_referral_code_succeeds_without_referrer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let mut body = join_body("Ayesha", "ayesha@lums.edu.pk");
    body["referral_code"] = json!("NOSUCH00");

    let response = post_json(app, "/api/v1/waitlist", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let referrer_id: Option<i64> =
        sqlx::query_scalar("SELECT referrer_id FROM waitlist_entries WHERE email = $1")
            .bind("ayesha@lums.edu.pk")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(referrer_id, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn join_with_referral_code_credits_the_referrer(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/waitlist",
        &join_body("Ayesha", "a@lums.edu.pk"),
    )
    .await;
    let code = body_json(response).await["data"]["referral_code"]
        .as_str()
        .unwrap()
        .to_string();

    let mut body = join_body("Bilal", "b@nust.edu.pk");
    body["referral_code"] = json!(code);
    let response = post_json(app.clone(), "/api/v1/waitlist", &body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The referrer's status now shows one referral.
    let response = get(app, "/api/v1/waitlist/status?email=a@lums.edu.pk").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["referral_count"], 1);
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn status_for_unknown_email_returns_not_on_waitlist(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/waitlist/status?email=nobody@lums.edu.pk").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_ON_WAITLIST");
}

#[sqlx::test(migrations = "../../migrations")]
async fn status_reports_total_ahead(pool: PgPool) {
    let app = common::build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/waitlist",
        &join_body("Ayesha", "a@lums.edu.pk"),
    )
    .await;
    post_json(
        app.clone(),
        "/api/v1/waitlist",
        &join_body("Bilal", "b@nust.edu.pk"),
    )
    .await;

    let response = get(app, "/api/v1/waitlist/status?email=b@nust.edu.pk").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["status"], "waiting");
    assert_eq!(data["total_ahead"], 1);
    assert_eq!(data["referral_count"], 0);
    assert!(data["referral_link"].as_str().unwrap().contains("/waitlist?ref="));
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn leaderboard_is_bounded_and_sorted(pool: PgPool) {
    let app = common::build_test_app(pool);

    // First signup, then two more referred by the first.
    let response = post_json(
        app.clone(),
        "/api/v1/waitlist",
        &join_body("Ayesha", "a@lums.edu.pk"),
    )
    .await;
    let code = body_json(response).await["data"]["referral_code"]
        .as_str()
        .unwrap()
        .to_string();

    for (name, email) in [("Bilal", "b@nust.edu.pk"), ("Chandra", "c@fast.edu.pk")] {
        let mut body = join_body(name, email);
        body["referral_code"] = json!(code);
        post_json(app.clone(), "/api/v1/waitlist", &body).await;
    }

    let response = get(app, "/api/v1/waitlist/leaderboard?limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];

    let entries = data["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["referral_count"], 2);
    assert!(
        entries[0]["referral_count"].as_i64().unwrap()
            >= entries[1]["referral_count"].as_i64().unwrap()
    );
    assert_eq!(data["total_signups"], 3);
}
