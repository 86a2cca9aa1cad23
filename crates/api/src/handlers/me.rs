//! Handlers for the authenticated user's own resources.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use homehni_db::repositories::{FavoriteRepo, ListingRepo};

use crate::error::AppResult;
use crate::handlers::auth::load_active_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
///
/// The caller's own profile.
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = load_active_user(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/me/favorites
///
/// The caller's favorited listings, most recently favorited first.
/// Listings deleted since favoriting simply drop out of the join.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let listings = FavoriteRepo::list_listings_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/v1/me/listings
///
/// The caller's own listings in every status, newest first.
pub async fn list_own_listings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let listings = ListingRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: listings }))
}
