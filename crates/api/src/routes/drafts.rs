//! Route definitions for the submission-wizard `/drafts` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::drafts;
use crate::state::AppState;

/// Routes mounted at `/drafts`. All require authentication.
///
/// ```text
/// POST   /                   -> create draft slot (409 if one exists)
/// GET    /current            -> fetch the caller's draft
/// DELETE /current            -> discard the draft
/// PUT    /current/step-data  -> merge a partial save
/// POST   /current/advance    -> forward one step (validates current step)
/// POST   /current/back       -> back one step (no validation)
/// POST   /current/submit     -> convert to pending listing
/// POST   /resume             -> server-vs-cache resume decision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(drafts::create_draft))
        .route(
            "/current",
            get(drafts::get_current_draft).delete(drafts::discard_draft),
        )
        .route("/current/step-data", put(drafts::save_step_data))
        .route("/current/advance", post(drafts::advance_step))
        .route("/current/back", post(drafts::back_step))
        .route("/current/submit", post(drafts::submit_draft))
        .route("/resume", post(drafts::resume_draft))
}
