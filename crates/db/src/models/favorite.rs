//! Favorite mark model.

use homehni_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table: a `(user, listing)` mark.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub listing_id: DbId,
    pub created_at: Timestamp,
}
