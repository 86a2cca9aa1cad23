//! Route definitions for the public `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{favorites, listings};
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /               -> search approved listings (public)
/// GET    /{id}           -> listing detail (public, approved only)
/// PUT    /{id}           -> owner re-edit (auth)
/// DELETE /{id}           -> delete (owner or admin)
/// POST   /{id}/favorite  -> toggle favorite (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::search_listings))
        .route(
            "/{id}",
            get(listings::get_listing)
                .put(listings::update_listing)
                .delete(listings::delete_listing),
        )
        .route("/{id}/favorite", post(favorites::toggle_favorite))
}
