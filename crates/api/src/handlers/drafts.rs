//! Handlers for the submission-wizard `/drafts` resource.
//!
//! Every mutating handler serializes on the caller's draft lock so that
//! concurrent saves from multiple tabs cannot interleave their
//! read-merge-write cycles.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use homehni_core::draft_wizard::{
    can_submit, merge_step_data, resolve_resume, validate_step_data, validate_step_transition,
    validate_submission, CachedDraft, ResumeDecision,
};
use homehni_core::error::CoreError;
use homehni_db::models::draft::{Draft, SaveStepData};
use homehni_db::repositories::DraftRepo;
use homehni_events::bus::EVENT_LISTING_SUBMITTED;
use homehni_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /drafts/resume`.
#[derive(Debug, Default, Deserialize)]
pub struct ResumeRequest {
    /// The draft snapshot the client cached on-device, if any.
    pub cached: Option<CachedDraft>,
}

/// Response body for `POST /drafts/resume`.
#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    /// `"continue_server"`, `"adopt_cache"`, or `"start_fresh"`.
    pub decision: &'static str,
    pub draft: Draft,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/drafts
///
/// Create the caller's draft slot at step 1. Each user has at most one
/// draft; a second create is a conflict.
pub async fn create_draft(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    if DraftRepo::find_by_user(&state.pool, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A draft already exists. Resume or discard it first.".into(),
        )));
    }

    let draft = DraftRepo::create(&state.pool, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, draft_id = draft.id, "Draft created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: draft })))
}

/// GET /api/v1/drafts/current
///
/// Fetch the caller's draft, or 404 when no draft exists.
pub async fn get_current_draft(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let draft = require_draft(&state, auth.user_id).await?;
    Ok(Json(DataResponse { data: draft }))
}

/// PUT /api/v1/drafts/current/step-data
///
/// Merge a partial step-data update into the draft. Namespaces absent from
/// the update are preserved; re-saving identical data is a no-op.
pub async fn save_step_data(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveStepData>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let draft = require_draft(&state, auth.user_id).await?;

    let merged = merge_step_data(&draft.step_data, &input.step_data)?;

    // Identical payloads skip the write entirely, so `updated_at` only
    // moves when the data actually changed.
    if merged == draft.step_data {
        return Ok(Json(DataResponse { data: draft }));
    }

    let updated = DraftRepo::update_step_data(&state.pool, auth.user_id, &merged)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: draft.id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/drafts/current/advance
///
/// Move the draft forward one step. The current step's data must validate
/// before the transition is allowed.
pub async fn advance_step(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let draft = require_draft(&state, auth.user_id).await?;
    let current = draft.current_step as u8;

    validate_step_data(current, &draft.step_data)?;
    validate_step_transition(current, current + 1)?;

    let updated = DraftRepo::update_step(&state.pool, auth.user_id, draft.current_step + 1)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: draft.id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/drafts/current/back
///
/// Move the draft back one step. Back navigation never validates step data.
pub async fn back_step(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let draft = require_draft(&state, auth.user_id).await?;
    let current = draft.current_step as u8;

    validate_step_transition(current, current.wrapping_sub(1))?;

    let updated = DraftRepo::update_step(&state.pool, auth.user_id, draft.current_step - 1)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: draft.id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/drafts/current/submit
///
/// Convert the draft into a pending listing and delete the draft, in one
/// transaction. The draft must be on the Preview step and every
/// data-bearing step is re-validated.
pub async fn submit_draft(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let draft = require_draft(&state, auth.user_id).await?;

    can_submit(draft.current_step as u8)?;
    let submission = validate_submission(&draft.step_data)?;

    let listing = DraftRepo::submit(&state.pool, auth.user_id, &submission).await?;

    tracing::info!(
        user_id = auth.user_id,
        listing_id = listing.id,
        "Draft submitted for moderation"
    );

    state.event_bus.publish(
        PlatformEvent::new(EVENT_LISTING_SUBMITTED)
            .with_source("listing", listing.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "owner_id": listing.owner_id,
                "title": listing.title,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// DELETE /api/v1/drafts/current
///
/// Discard the caller's draft. Returns 204, or 404 when no draft exists.
pub async fn discard_draft(auth: AuthUser, State(state): State<AppState>) -> AppResult<StatusCode> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let deleted = DraftRepo::delete_by_user(&state.pool, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: auth.user_id,
        }));
    }

    tracing::info!(user_id = auth.user_id, "Draft discarded");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/drafts/resume
///
/// Decide how to resume the wizard. The server draft always wins; a valid
/// device cache is adopted only when no server draft exists; otherwise a
/// fresh draft starts at step 1.
pub async fn resume_draft(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ResumeRequest>,
) -> AppResult<impl IntoResponse> {
    let _guard = state.draft_locks.acquire(auth.user_id).await;

    let server_draft = DraftRepo::find_by_user(&state.pool, auth.user_id).await?;

    match resolve_resume(server_draft.is_some(), input.cached) {
        ResumeDecision::ContinueServer => {
            // resolve_resume returned ContinueServer, so the row exists.
            let draft = server_draft.ok_or_else(|| {
                AppError::InternalError("Draft row disappeared during resume".into())
            })?;
            Ok(Json(DataResponse {
                data: ResumeResponse {
                    decision: "continue_server",
                    draft,
                },
            }))
        }
        ResumeDecision::AdoptCache(snapshot) => {
            let draft = DraftRepo::create_from_cache(
                &state.pool,
                auth.user_id,
                snapshot.current_step,
                &snapshot.step_data,
            )
            .await?;
            tracing::info!(
                user_id = auth.user_id,
                step = snapshot.current_step,
                "Adopted device-cached draft"
            );
            Ok(Json(DataResponse {
                data: ResumeResponse {
                    decision: "adopt_cache",
                    draft,
                },
            }))
        }
        ResumeDecision::StartFresh => {
            let draft = DraftRepo::create(&state.pool, auth.user_id).await?;
            Ok(Json(DataResponse {
                data: ResumeResponse {
                    decision: "start_fresh",
                    draft,
                },
            }))
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the caller's draft or fail with 404.
async fn require_draft(state: &AppState, user_id: homehni_core::types::DbId) -> AppResult<Draft> {
    DraftRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Draft",
            id: user_id,
        }))
}
