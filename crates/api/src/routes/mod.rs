pub mod admin;
pub mod auth;
pub mod drafts;
pub mod health;
pub mod leads;
pub mod listings;
pub mod me;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (token via ?token=)
///
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /listings                            search approved listings (public)
/// /listings/{id}                       listing detail (public, approved only)
/// /listings/{id}                       owner re-edit (PUT), delete (DELETE)
/// /listings/{id}/favorite              toggle favorite (POST, auth)
///
/// /drafts                              create draft slot (POST, auth)
/// /drafts/current                      get (GET), discard (DELETE)
/// /drafts/current/step-data            merge partial save (PUT)
/// /drafts/current/advance              forward one step (POST)
/// /drafts/current/back                 back one step (POST)
/// /drafts/current/submit               submit for moderation (POST)
/// /drafts/resume                       resume decision (POST)
///
/// /leads                               capture enquiry (POST, public)
///
/// /me                                  own profile (GET, auth)
/// /me/favorites                        favorited listings (GET, auth)
/// /me/listings                         own listings (GET, auth)
///
/// /admin/listings                      moderation queue (GET, admin)
/// /admin/listings/{id}/approve         approve (POST, admin)
/// /admin/listings/{id}/reject          reject with reason (POST, admin)
/// /admin/leads                         all leads (GET, admin)
/// /admin/users                         all users (GET, admin)
/// /admin/users/{id}/active             (de)activate account (PUT, admin)
/// /admin/events                        recent platform events (GET, admin)
/// /admin/stats                         headline counts (GET, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint for real-time notifications.
        .route("/ws", get(ws::ws_handler))
        // Authentication (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Public search/detail plus owner edit and favorites.
        .nest("/listings", listings::router())
        // Submission wizard drafts.
        .nest("/drafts", drafts::router())
        // Public lead capture.
        .nest("/leads", leads::router())
        // The caller's own resources.
        .nest("/me", me::router())
        // Back-office moderation and administration.
        .nest("/admin", admin::router())
}
