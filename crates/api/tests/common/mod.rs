//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` (via
//! `build_app_router`) so tests exercise the same middleware stack that
//! production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use homehni_api::auth::jwt::JwtConfig;
use homehni_api::auth::password::hash_password;
use homehni_api::config::ServerConfig;
use homehni_api::locks::DraftLocks;
use homehni_api::router::build_app_router;
use homehni_api::state::AppState;
use homehni_api::ws::WsManager;
use homehni_core::draft_wizard::SubmissionData;
use homehni_core::listing::{Intent, ListingKind, ListingStatus, PropertyType};
use homehni_core::roles::{ROLE_ADMIN, ROLE_USER};
use homehni_core::types::DbId;
use homehni_db::models::listing::Listing;
use homehni_db::models::user::{CreateUser, User};
use homehni_db::repositories::{DraftRepo, ListingRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-do-not-use-in-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(homehni_events::EventBus::default()),
        draft_locks: Arc::new(DraftLocks::new()),
    };
    build_app_router(state, &config)
}

/// Like [`build_test_app`], but with the event persistence task wired to the
/// bus, for tests that assert on the persisted event feed.
pub fn build_test_app_with_events(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(homehni_events::EventBus::default());
    tokio::spawn(homehni_events::EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus,
        draft_locks: Arc::new(DraftLocks::new()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON POST request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON POST request with a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an empty-body POST request with a Bearer token.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON PUT request with a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// User seeding
// ---------------------------------------------------------------------------

/// The plaintext password shared by every seeded test user.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Create a regular user directly in the database.
pub async fn seed_user(pool: &PgPool, email: &str) -> User {
    seed_user_with_role(pool, email, ROLE_USER).await
}

/// Create an admin user directly in the database.
pub async fn seed_admin(pool: &PgPool, email: &str) -> User {
    seed_user_with_role(pool, email, ROLE_ADMIN).await
}

async fn seed_user_with_role(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        full_name: "Test User".to_string(),
        phone: None,
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Listing seeding
// ---------------------------------------------------------------------------

/// A minimal valid property submission for seeding listings.
pub fn submission(title: &str, city: &str, price: Option<i64>) -> SubmissionData {
    SubmissionData {
        kind: ListingKind::Property,
        intent: Intent::Sell,
        property_type: Some(PropertyType::Apartment),
        title: title.to_string(),
        description: None,
        price,
        country: "India".to_string(),
        state: "Maharashtra".to_string(),
        city: city.to_string(),
        locality: None,
        bedrooms: Some(2),
        bathrooms: Some(2),
        area_value: Some(950.0),
        area_unit: Some("sq_ft".to_string()),
        amenities: vec!["lift".to_string()],
        media: vec![],
    }
}

/// Insert a pending listing for the given owner.
///
/// Uses the same transactional path as draft submission (the only
/// production write path into `listings`).
pub async fn seed_pending_listing(pool: &PgPool, owner_id: DbId, data: &SubmissionData) -> Listing {
    DraftRepo::submit(pool, owner_id, data)
        .await
        .expect("listing insert should succeed")
}

/// Insert an already-approved listing for the given owner.
pub async fn seed_approved_listing(pool: &PgPool, owner_id: DbId, data: &SubmissionData) -> Listing {
    let listing = seed_pending_listing(pool, owner_id, data).await;
    ListingRepo::update_status(pool, listing.id, ListingStatus::Approved.as_str(), None)
        .await
        .expect("approval should succeed")
        .expect("listing should exist")
}

/// Log in a seeded user via the API and return the access token.
pub async fn login_token(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login response must contain access_token")
        .to_string()
}
