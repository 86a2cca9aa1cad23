//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Default page length for admin list endpoints.
const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on admin list page length.
const MAX_LIMIT: i64 = 200;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by the admin back-office list endpoints. Values are clamped via
/// [`PaginationParams::clamp`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to `(limit, offset)` with safe bounds.
    pub fn clamp(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}
