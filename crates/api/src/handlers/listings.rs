//! Handlers for the public `/listings` resource: search, detail, owner edit,
//! and deletion.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use homehni_core::error::CoreError;
use homehni_core::listing::{owner_can_edit, ListingStatus};
use homehni_core::roles::ROLE_ADMIN;
use homehni_core::search::{self, Page, RawSearchQuery, SearchCriteria};
use homehni_core::types::DbId;
use homehni_db::models::listing::{Listing, UpdateListing};
use homehni_db::repositories::ListingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/listings
///
/// Search approved listings. All query parameters are optional; bad values
/// degrade to "filter skipped" rather than erroring.
pub async fn search_listings(
    State(state): State<AppState>,
    Query(raw): Query<RawSearchQuery>,
) -> AppResult<impl IntoResponse> {
    let criteria = SearchCriteria::from_raw(&raw);

    let approved = ListingRepo::list_approved(&state.pool).await?;

    // Rows that fail enum parsing indicate schema drift; they are logged
    // and dropped from the result rather than failing the whole search.
    let candidates: Vec<_> = approved
        .iter()
        .filter_map(|listing| match listing.search_candidate() {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::error!(listing_id = listing.id, error = %e, "Unparseable listing row");
                None
            }
        })
        .collect();

    let page = search::run(&candidates, &criteria);

    // Re-wrap the page over owned rows; the candidates only borrow the
    // local result set.
    let result = Page {
        items: page
            .items
            .iter()
            .map(|candidate| candidate.listing.clone())
            .collect::<Vec<Listing>>(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        has_more: page.has_more,
    };

    Ok(Json(DataResponse { data: result }))
}

/// GET /api/v1/listings/{id}
///
/// Fetch a single listing. Only approved listings are publicly visible;
/// anything else is indistinguishable from a missing row.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;

    if listing.status != ListingStatus::Approved.as_str() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }));
    }

    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/listings/{id}
///
/// Owner re-edit of a pending or rejected listing. The edit resets the
/// listing to `pending` and clears any rejection reason, so it re-enters
/// the moderation queue.
pub async fn update_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateListing>,
) -> AppResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;

    if listing.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the listing owner can edit it".into(),
        )));
    }

    let status = ListingStatus::from_str_db(&listing.status)?;
    if !owner_can_edit(status) {
        return Err(AppError::Core(CoreError::Conflict(
            "Approved listings are live and cannot be edited. \
             Contact support to delist first."
                .into(),
        )));
    }

    let updated = ListingRepo::update_by_owner(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    tracing::info!(listing_id = id, owner_id = auth.user_id, "Listing re-edited");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/listings/{id}
///
/// Delete a listing. Allowed for the owner or an admin. Returns 204.
pub async fn delete_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let listing = find_listing(&state, id).await?;

    if listing.owner_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the listing owner or an admin can delete it".into(),
        )));
    }

    ListingRepo::delete(&state.pool, id).await?;

    tracing::info!(listing_id = id, user_id = auth.user_id, "Listing deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Shared lookup: load a listing row or fail with 404.
pub async fn find_listing(state: &AppState, id: DbId) -> AppResult<Listing> {
    ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))
}
