//! Handler for the public lead-capture endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use homehni_core::leads::NewLead;
use homehni_db::models::lead::CreateLead;
use homehni_db::repositories::{LeadRepo, ListingRepo};
use homehni_events::bus::EVENT_LEAD_CREATED;
use homehni_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/leads
///
/// Record a visitor enquiry. Public endpoint: no authentication. The
/// payload is validated and trimmed before it touches the database, and a
/// referenced listing must actually exist.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(input): Json<NewLead>,
) -> AppResult<impl IntoResponse> {
    let lead = input.validated()?;

    // A lead may arrive without a listing (general enquiry form), but a
    // listing reference must point at a real row.
    if let Some(listing_id) = lead.listing_id {
        ListingRepo::find_by_id(&state.pool, listing_id)
            .await?
            .ok_or(AppError::Core(homehni_core::error::CoreError::NotFound {
                entity: "Listing",
                id: listing_id,
            }))?;
    }

    let create = CreateLead {
        listing_id: lead.listing_id,
        name: lead.name,
        phone: lead.phone,
        email: lead.email,
        message: lead.message,
    };

    let stored = LeadRepo::create(&state.pool, &create).await?;

    tracing::info!(lead_id = stored.id, listing_id = ?stored.listing_id, "Lead captured");

    state.event_bus.publish(
        PlatformEvent::new(EVENT_LEAD_CREATED)
            .with_source("lead", stored.id)
            .with_payload(serde_json::json!({
                "listing_id": stored.listing_id,
                "name": stored.name,
            })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}
