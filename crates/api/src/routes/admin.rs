//! Route definitions for the `/admin` back-office. All routes require the
//! `admin` role via the `RequireAdmin` extractor on each handler.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET  /listings               -> moderation queue (?status=, default pending)
/// POST /listings/{id}/approve  -> approve a listing
/// POST /listings/{id}/reject   -> reject with a mandatory reason
/// GET  /leads                  -> all captured leads
/// GET  /users                  -> all registered users
/// PUT  /users/{id}/active      -> (de)activate an account
/// GET  /events                 -> recent platform events
/// GET  /stats                  -> headline counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(admin::list_queue))
        .route("/listings/{id}/approve", post(admin::approve_listing))
        .route("/listings/{id}/reject", post(admin::reject_listing))
        .route("/leads", get(admin::list_leads))
        .route("/users", get(admin::list_users))
        .route("/users/{id}/active", put(admin::set_user_active))
        .route("/events", get(admin::list_events))
        .route("/stats", get(admin::get_stats))
}
