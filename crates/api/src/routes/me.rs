//! Route definitions for the authenticated `/me` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require authentication.
///
/// ```text
/// GET /           -> own profile
/// GET /favorites  -> favorited listings
/// GET /listings   -> own listings (all statuses)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_profile))
        .route("/favorites", get(me::list_favorites))
        .route("/listings", get(me::list_own_listings))
}
