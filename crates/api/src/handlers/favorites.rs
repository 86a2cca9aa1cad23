//! Handler for the favorite toggle.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use homehni_core::error::CoreError;
use homehni_core::listing::ListingStatus;
use homehni_core::types::DbId;
use homehni_db::repositories::FavoriteRepo;
use homehni_events::bus::EVENT_FAVORITE_TOGGLED;
use homehni_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::listings::find_listing;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the toggle: the resulting state.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub favorited: bool,
}

/// POST /api/v1/listings/{id}/favorite
///
/// Toggle the caller's favorite on an approved listing. The delete-then-
/// maybe-insert runs in one transaction so double-clicks cannot produce
/// duplicate rows.
pub async fn toggle_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = find_listing(&state, listing_id).await?;

    // Only live listings can be favorited; pending/rejected rows are not
    // publicly visible, so treat them as missing.
    if listing.status != ListingStatus::Approved.as_str() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }));
    }

    let favorited = FavoriteRepo::toggle(&state.pool, auth.user_id, listing_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        listing_id,
        favorited,
        "Favorite toggled"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_FAVORITE_TOGGLED)
            .with_source("listing", listing_id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({ "favorited": favorited })),
    );

    Ok(Json(DataResponse {
        data: ToggleResponse { favorited },
    }))
}
