//! Lead entity model and DTOs.

use homehni_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub listing_id: Option<DbId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a lead (already validated and trimmed).
#[derive(Debug, Clone)]
pub struct CreateLead {
    pub listing_id: Option<DbId>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
}
