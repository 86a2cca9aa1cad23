//! HTTP-level integration tests for the public search and listing detail
//! endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, seed_approved_listing, seed_pending_listing, seed_user, submission};
use sqlx::PgPool;

/// Search returns only approved listings.
#[sqlx::test(migrations = "../db/migrations")]
async fn search_excludes_unapproved_listings(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    seed_approved_listing(&pool, owner.id, &submission("Live", "Pune", Some(5_000_000))).await;
    seed_pending_listing(&pool, owner.id, &submission("Queued", "Pune", Some(4_000_000))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Live");
}

/// City filtering is a case-insensitive substring match.
#[sqlx::test(migrations = "../db/migrations")]
async fn search_city_is_substring_match(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    seed_approved_listing(&pool, owner.id, &submission("A", "Mumbai", Some(1_000_000))).await;
    seed_approved_listing(&pool, owner.id, &submission("B", "Navi Mumbai", Some(2_000_000))).await;
    seed_approved_listing(&pool, owner.id, &submission("C", "Pune", Some(3_000_000))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings?city=mumbai").await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
}

/// Sell-intent searches rank price descending.
#[sqlx::test(migrations = "../db/migrations")]
async fn sell_search_ranks_price_descending(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    seed_approved_listing(&pool, owner.id, &submission("Cheap", "Pune", Some(1_000_000))).await;
    seed_approved_listing(&pool, owner.id, &submission("Dear", "Pune", Some(9_000_000))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings?intent=sell").await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["items"][0]["title"], "Dear");
    assert_eq!(json["data"]["items"][1]["title"], "Cheap");
}

/// Price-on-request listings survive budget filters and sort last.
#[sqlx::test(migrations = "../db/migrations")]
async fn price_on_request_survives_budget_and_sorts_last(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    seed_approved_listing(&pool, owner.id, &submission("Priced", "Pune", Some(2_000_000))).await;
    seed_approved_listing(&pool, owner.id, &submission("OnRequest", "Pune", None)).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings?budgetMax=1").await;

    let json = body_json(response).await;
    // Only the unpriced listing passes a 1-rupee budget cap.
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "OnRequest");
    assert!(json["data"]["items"][0]["price"].is_null());
}

/// Garbage query parameters degrade to "show everything" rather than 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_query_params_do_not_error(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    seed_approved_listing(&pool, owner.id, &submission("Only", "Pune", Some(1_000_000))).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/listings?intent=timeshare&budgetMin=cheap&page=last&bedrooms=many",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
}

/// Pagination counters: page, page_size, total, has_more.
#[sqlx::test(migrations = "../db/migrations")]
async fn pagination_counters_are_consistent(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    for i in 0..5 {
        seed_approved_listing(
            &pool,
            owner.id,
            &submission(&format!("L{i}"), "Pune", Some(1_000_000 + i)),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings?pageSize=2&page=2").await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 5);
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["page_size"], 2);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["has_more"], true);
}

// ---------------------------------------------------------------------------
// Listing detail
// ---------------------------------------------------------------------------

/// An approved listing is publicly visible by id.
#[sqlx::test(migrations = "../db/migrations")]
async fn approved_listing_detail_is_public(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_approved_listing(&pool, owner.id, &submission("Villa", "Pune", Some(8_000_000))).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/listings/{}", listing.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], listing.id);
    assert_eq!(json["data"]["status"], "approved");
}

/// A pending listing is indistinguishable from a missing one.
#[sqlx::test(migrations = "../db/migrations")]
async fn pending_listing_detail_is_hidden(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let listing =
        seed_pending_listing(&pool, owner.id, &submission("Hidden", "Pune", Some(8_000_000))).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/listings/{}", listing.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/listings/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
