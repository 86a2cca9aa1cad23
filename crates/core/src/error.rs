//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by domain logic and repository callers.
///
/// The API layer maps each variant onto an HTTP status code; see
/// `homehni-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Listing"`.
        entity: &'static str,
        id: DbId,
    },

    /// Input failed validation; the message is safe to show to users.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state (duplicate slot, etc.).
    #[error("{0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks permission.
    #[error("{0}")]
    Forbidden(String),

    /// An unexpected internal failure; the message is logged, never shown.
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Listing",
            id: 42,
        };
        assert_eq!(err.to_string(), "Listing with id 42 not found");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = CoreError::Validation("Title is required".into());
        assert_eq!(err.to_string(), "Title is required");
    }
}
