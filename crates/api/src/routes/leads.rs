//! Route definitions for the public `/leads` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// POST / -> capture a visitor enquiry (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(leads::create_lead))
}
