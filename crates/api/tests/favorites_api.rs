//! HTTP-level integration tests for favorites: toggle and personal list.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, login_token, post_auth, seed_approved_listing, seed_pending_listing,
    seed_user, submission,
};
use sqlx::PgPool;

/// Toggling twice flips the favorite on and back off.
#[sqlx::test(migrations = "../db/migrations")]
async fn toggle_favorite_flips_state(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_approved_listing(&pool, owner.id, &submission("Flat", "Pune", Some(3_000_000))).await;

    seed_user(&pool, "buyer@example.com").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "buyer@example.com").await;

    let uri = format!("/api/v1/listings/{}/favorite", listing.id);

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["favorited"], true);

    let app = common::build_test_app(pool);
    let response = post_auth(app, &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["favorited"], false);
}

/// Only approved listings can be favorited.
#[sqlx::test(migrations = "../db/migrations")]
async fn pending_listing_cannot_be_favorited(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_pending_listing(&pool, owner.id, &submission("Queued", "Pune", Some(3_000_000))).await;

    seed_user(&pool, "buyer@example.com").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "buyer@example.com").await;

    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/listings/{}/favorite", listing.id);
    let response = post_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Favoriting requires authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn toggle_favorite_requires_auth(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_approved_listing(&pool, owner.id, &submission("Flat", "Pune", Some(3_000_000))).await;

    let app = common::build_test_app(pool.clone());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/v1/listings/{}/favorite", listing.id))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// GET /me/favorites reflects toggles.
#[sqlx::test(migrations = "../db/migrations")]
async fn me_favorites_lists_then_empties(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let first =
        seed_approved_listing(&pool, owner.id, &submission("First", "Pune", Some(1_000_000))).await;
    let second =
        seed_approved_listing(&pool, owner.id, &submission("Second", "Pune", Some(2_000_000))).await;

    seed_user(&pool, "buyer@example.com").await;
    let app = common::build_test_app(pool.clone());
    let token = login_token(app, "buyer@example.com").await;

    for id in [first.id, second.id] {
        let app = common::build_test_app(pool.clone());
        post_auth(app, &format!("/api/v1/listings/{id}/favorite"), &token).await;
    }

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/me/favorites", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // Un-favorite both and the list is empty again.
    for id in [first.id, second.id] {
        let app = common::build_test_app(pool.clone());
        post_auth(app, &format!("/api/v1/listings/{id}/favorite"), &token).await;
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/me/favorites", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}
