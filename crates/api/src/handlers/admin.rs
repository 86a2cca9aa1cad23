//! Handlers for the admin back-office: moderation queue, approve/reject,
//! leads, users, events, and platform stats.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use homehni_core::error::CoreError;
use homehni_core::listing::{validate_status_transition, ListingStatus};
use homehni_core::pricing::display_price;
use homehni_core::types::DbId;
use homehni_db::models::user::UserResponse;
use homehni_db::repositories::{EventRepo, LeadRepo, ListingRepo, SessionRepo, UserRepo};
use homehni_events::bus::{EVENT_LISTING_APPROVED, EVENT_LISTING_REJECTED};
use homehni_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::listings::find_listing;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the moderation queue.
#[derive(Debug, Default, Deserialize)]
pub struct QueueParams {
    /// Status filter; defaults to `pending`.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/listings/{id}/reject`.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Request body for `PUT /admin/users/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Query parameters for the event feed.
#[derive(Debug, Default, Deserialize)]
pub struct EventFeedParams {
    pub limit: Option<i64>,
}

/// A paginated list envelope with the total row count.
#[derive(Debug, Serialize)]
pub struct CountedList<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Response body for `GET /admin/stats`.
#[derive(Debug, Serialize)]
pub struct PlatformStats {
    pub pending_listings: i64,
    pub approved_listings: i64,
    pub rejected_listings: i64,
    pub users: i64,
    pub leads: i64,
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/listings
///
/// The moderation queue, oldest submission first. Defaults to `pending`;
/// pass `?status=` to inspect approved or rejected listings.
pub async fn list_queue(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<QueueParams>,
) -> AppResult<impl IntoResponse> {
    let status = match params.status.as_deref() {
        Some(s) => ListingStatus::from_str_db(s)?,
        None => ListingStatus::Pending,
    };

    let pagination = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };
    let (limit, offset) = pagination.clamp();

    let items = ListingRepo::list_by_status(&state.pool, status.as_str(), limit, offset).await?;
    let total = ListingRepo::count_by_status(&state.pool, status.as_str()).await?;

    Ok(Json(DataResponse {
        data: CountedList { items, total },
    }))
}

/// POST /api/v1/admin/listings/{id}/approve
///
/// Approve a listing, making it publicly searchable. Clears any prior
/// rejection reason.
pub async fn approve_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let listing = find_listing(&state, id).await?;
    let current = ListingStatus::from_str_db(&listing.status)?;

    validate_status_transition(current, ListingStatus::Approved)?;

    let updated = ListingRepo::update_status(&state.pool, id, ListingStatus::Approved.as_str(), None)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    tracing::info!(listing_id = id, admin_id = admin.user_id, "Listing approved");

    state.event_bus.publish(
        PlatformEvent::new(EVENT_LISTING_APPROVED)
            .with_source("listing", id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "owner_id": updated.owner_id,
                "title": updated.title,
                // The notification card shows the price as listed.
                "price_display": display_price(updated.price),
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/admin/listings/{id}/reject
///
/// Reject a listing with a mandatory human-readable reason.
pub async fn reject_listing(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectRequest>,
) -> AppResult<impl IntoResponse> {
    let reason = input.reason.trim();
    if reason.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A rejection reason is required".into(),
        )));
    }

    let listing = find_listing(&state, id).await?;
    let current = ListingStatus::from_str_db(&listing.status)?;

    validate_status_transition(current, ListingStatus::Rejected)?;

    let updated = ListingRepo::update_status(
        &state.pool,
        id,
        ListingStatus::Rejected.as_str(),
        Some(reason),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Listing",
        id,
    }))?;

    tracing::info!(
        listing_id = id,
        admin_id = admin.user_id,
        reason,
        "Listing rejected"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_LISTING_REJECTED)
            .with_source("listing", id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "owner_id": updated.owner_id,
                "title": updated.title,
                "reason": reason,
            })),
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Leads, users, events
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/leads
///
/// All captured leads, newest first.
pub async fn list_leads(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.clamp();
    let items = LeadRepo::list_recent(&state.pool, limit, offset).await?;
    let total = LeadRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: CountedList { items, total },
    }))
}

/// GET /api/v1/admin/users
///
/// All registered users, newest first.
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = params.clamp();
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let total = UserRepo::count(&state.pool).await?;

    let items: Vec<UserResponse> = users.iter().map(|u| u.to_response()).collect();

    Ok(Json(DataResponse {
        data: CountedList { items, total },
    }))
}

/// PUT /api/v1/admin/users/{id}/active
///
/// Activate or deactivate a user account. Deactivation also revokes every
/// session so the account is locked out immediately, not at token expiry.
pub async fn set_user_active(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !input.is_active {
        let revoked = SessionRepo::revoke_all_for_user(&state.pool, id).await?;
        tracing::info!(user_id = id, revoked, "Sessions revoked on deactivation");
    }

    tracing::info!(
        user_id = id,
        admin_id = admin.user_id,
        is_active = input.is_active,
        "User active flag changed"
    );

    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// GET /api/v1/admin/events
///
/// The most recent platform events, newest first.
pub async fn list_events(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<EventFeedParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(100).clamp(1, 500);
    let events = EventRepo::list_recent(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: events }))
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/stats
///
/// Headline counts for the back-office dashboard.
pub async fn get_stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pending_listings =
        ListingRepo::count_by_status(&state.pool, ListingStatus::Pending.as_str()).await?;
    let approved_listings =
        ListingRepo::count_by_status(&state.pool, ListingStatus::Approved.as_str()).await?;
    let rejected_listings =
        ListingRepo::count_by_status(&state.pool, ListingStatus::Rejected.as_str()).await?;
    let users = UserRepo::count(&state.pool).await?;
    let leads = LeadRepo::count(&state.pool).await?;

    Ok(Json(DataResponse {
        data: PlatformStats {
            pending_listings,
            approved_listings,
            rejected_listings,
            users,
            leads,
        },
    }))
}
