//! HTTP-level integration tests for the submission-wizard draft endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, login_token, post_auth, post_json_auth, put_json_auth,
    seed_user,
};
use serde_json::json;
use sqlx::PgPool;

fn property_details() -> serde_json::Value {
    json!({
        "title": "2BHK in Baner",
        "kind": "property",
        "intent": "sell",
        "property_type": "apartment",
        "bedrooms": 2,
        "bathrooms": 2,
    })
}

/// Step-data payloads keyed by the step they satisfy, in wizard order.
fn step_payloads() -> Vec<serde_json::Value> {
    vec![
        json!({ "step_data": { "property_details": property_details() } }),
        json!({ "step_data": { "location": { "country": "India", "state": "Maharashtra", "city": "Pune" } } }),
        json!({ "step_data": { "pricing": { "expected_price": 7_500_000 } } }),
        json!({ "step_data": { "amenities": ["lift", "parking"] } }),
        json!({ "step_data": { "gallery": ["https://cdn.example.com/1.jpg"] } }),
        json!({ "step_data": { "schedule": { "days": ["sat", "sun"] } } }),
    ]
}

async fn seeded_token(pool: &PgPool, email: &str) -> String {
    seed_user(pool, email).await;
    let app = common::build_test_app(pool.clone());
    login_token(app, email).await
}

// ---------------------------------------------------------------------------
// Create / fetch / discard
// ---------------------------------------------------------------------------

/// Creating a draft returns 201 at step 1; a second create is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_draft_then_duplicate_conflicts(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 1);
    assert_eq!(json["data"]["step_data"], json!({}));

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// GET /drafts/current returns the draft, or 404 before one exists.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_current_draft(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/drafts/current", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/drafts/current", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 1);
}

/// DELETE /drafts/current discards the draft; a repeat delete is 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn discard_draft(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/drafts/current", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/drafts/current", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Draft endpoints require authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn draft_endpoints_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/drafts/current").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Step data saves
// ---------------------------------------------------------------------------

/// Saving one namespace preserves previously saved namespaces.
#[sqlx::test(migrations = "../db/migrations")]
async fn save_step_data_merges_by_namespace(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let app = common::build_test_app(pool.clone());
    let body = json!({ "step_data": { "location": { "country": "India", "state": "MH", "city": "Pune" } } });
    let response = put_json_auth(app, "/api/v1/drafts/current/step-data", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let body = json!({ "step_data": { "amenities": ["lift"] } });
    let response = put_json_auth(app, "/api/v1/drafts/current/step-data", body, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["step_data"]["location"]["city"], "Pune");
    assert_eq!(json["data"]["step_data"]["amenities"], json!(["lift"]));
}

/// Re-saving identical data does not bump `updated_at`.
#[sqlx::test(migrations = "../db/migrations")]
async fn save_identical_step_data_is_a_no_op(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let body = json!({ "step_data": { "amenities": ["lift"] } });
    let app = common::build_test_app(pool.clone());
    let response =
        put_json_auth(app, "/api/v1/drafts/current/step-data", body.clone(), &token).await;
    let first = body_json(response).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/v1/drafts/current/step-data", body, &token).await;
    let second = body_json(response).await;

    assert_eq!(first["data"]["updated_at"], second["data"]["updated_at"]);
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Advancing with invalid step data is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn advance_requires_valid_step_data(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    // Step 1 with no property details cannot advance.
    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/drafts/current/advance", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Going back from step 1 is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn back_from_step_one_is_invalid(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/drafts/current/back", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Walking the full wizard forward, one step at a time, reaches Preview.
#[sqlx::test(migrations = "../db/migrations")]
async fn full_walkthrough_reaches_preview(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    for (i, payload) in step_payloads().into_iter().enumerate() {
        let app = common::build_test_app(pool.clone());
        let response = put_json_auth(app, "/api/v1/drafts/current/step-data", payload, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "save for step {}", i + 1);

        let app = common::build_test_app(pool.clone());
        let response = post_auth(app, "/api/v1/drafts/current/advance", &token).await;
        assert_eq!(response.status(), StatusCode::OK, "advance from step {}", i + 1);
        let json = body_json(response).await;
        assert_eq!(json["data"]["current_step"], (i + 2) as i64);
    }

    // Back navigation works without re-validating anything.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/drafts/current/back", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 6);

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/drafts/current/advance", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 7);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Submitting before the Preview step is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn submit_before_preview_is_rejected(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let app = common::build_test_app(pool);
    let response = post_auth(app, "/api/v1/drafts/current/submit", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Submitting a complete draft creates a pending listing and removes the draft.
#[sqlx::test(migrations = "../db/migrations")]
async fn submit_creates_pending_listing_and_clears_draft(pool: PgPool) {
    let user = seed_user(&pool, "drafter@example.com").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    for payload in step_payloads() {
        let app = common::build_test_app(pool.clone());
        put_json_auth(app, "/api/v1/drafts/current/step-data", payload, &token).await;
        let app = common::build_test_app(pool.clone());
        post_auth(app, "/api/v1/drafts/current/advance", &token).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, "/api/v1/drafts/current/submit", &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["title"], "2BHK in Baner");
    assert_eq!(json["data"]["owner_id"], user.id);
    assert_eq!(json["data"]["price"], 7_500_000);

    // The draft slot is gone; the wizard can start over.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/drafts/current", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Resume
// ---------------------------------------------------------------------------

/// An existing server draft wins over any cached snapshot.
#[sqlx::test(migrations = "../db/migrations")]
async fn resume_prefers_server_draft(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/drafts", json!({}), &token).await;

    let body = json!({
        "cached": { "current_step": 4, "step_data": { "amenities": ["pool"] } }
    });
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/drafts/resume", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "continue_server");
    assert_eq!(json["data"]["draft"]["current_step"], 1);
}

/// With no server draft, a structurally valid cache is adopted.
#[sqlx::test(migrations = "../db/migrations")]
async fn resume_adopts_valid_cache(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    let body = json!({
        "cached": { "current_step": 3, "step_data": { "location": { "city": "Pune" } } }
    });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/drafts/resume", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "adopt_cache");
    assert_eq!(json["data"]["draft"]["current_step"], 3);
    assert_eq!(json["data"]["draft"]["step_data"]["location"]["city"], "Pune");

    // The adopted draft is now the server row.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/drafts/current", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current_step"], 3);
}

/// An invalid or missing cache starts a fresh draft at step 1.
#[sqlx::test(migrations = "../db/migrations")]
async fn resume_starts_fresh_without_usable_state(pool: PgPool) {
    let token = seeded_token(&pool, "drafter@example.com").await;

    // An out-of-range cached step is unusable.
    let body = json!({ "cached": { "current_step": 12, "step_data": {} } });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/drafts/resume", body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "start_fresh");
    assert_eq!(json["data"]["draft"]["current_step"], 1);

    // Discard and resume with no cache at all.
    let app = common::build_test_app(pool.clone());
    delete_auth(app, "/api/v1/drafts/current", &token).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/drafts/resume", json!({}), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "start_fresh");
}
