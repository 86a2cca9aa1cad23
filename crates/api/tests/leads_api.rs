//! HTTP-level integration tests for the public lead-capture endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, seed_approved_listing, seed_user, submission};
use serde_json::json;
use sqlx::PgPool;

fn lead_body() -> serde_json::Value {
    json!({
        "name": "Asha Rao",
        "phone": "+919812345678",
        "email": "asha@example.com",
        "message": "Interested in a site visit"
    })
}

/// A valid lead is stored with 201, no authentication required.
#[sqlx::test(migrations = "../db/migrations")]
async fn valid_lead_is_captured(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_approved_listing(&pool, owner.id, &submission("Flat", "Pune", Some(3_000_000))).await;

    let mut body = lead_body();
    body["listing_id"] = json!(listing.id);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Asha Rao");
    assert_eq!(json["data"]["listing_id"], listing.id);
}

/// A general enquiry without a listing reference is accepted.
#[sqlx::test(migrations = "../db/migrations")]
async fn lead_without_listing_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", lead_body()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["listing_id"].is_null());
}

/// A lead pointing at a nonexistent listing is rejected with 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn lead_for_missing_listing_is_rejected(pool: PgPool) {
    let mut body = lead_body();
    body["listing_id"] = json!(999_999);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A malformed phone number is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn bad_phone_is_rejected(pool: PgPool) {
    let mut body = lead_body();
    body["phone"] = json!("not-a-number");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Phone"));
}

/// A malformed email is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn bad_email_is_rejected(pool: PgPool) {
    let mut body = lead_body();
    body["email"] = json!("asha-at-example");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// A whitespace-only name is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn blank_name_is_rejected(pool: PgPool) {
    let mut body = lead_body();
    body["name"] = json!("   ");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/leads", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
