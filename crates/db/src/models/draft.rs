//! Draft entity model and DTOs.

use homehni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `drafts` table: one wizard slot per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Draft {
    pub id: DbId,
    pub user_id: DbId,
    /// 1-based wizard step, constrained to 1..=7.
    pub current_step: i32,
    /// Accumulated partial listing, keyed by per-step namespaces.
    pub step_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a partial step-data save.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveStepData {
    pub step_data: serde_json::Value,
}
