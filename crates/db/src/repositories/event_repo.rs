//! Repository for the `events` table (platform audit trail).

use homehni_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::Event;

const COLUMNS: &str =
    "id, event_type, source_entity_type, source_entity_id, actor_user_id, payload, created_at";

/// DTO for recording a platform event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
}

/// Provides append and read access to the event log.
pub struct EventRepo;

impl EventRepo {
    /// Append an event to the log.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events \
                (event_type, source_entity_type, source_entity_id, actor_user_id, payload) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.event_type)
            .bind(&input.source_entity_type)
            .bind(input.source_entity_id)
            .bind(input.actor_user_id)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// Most recent events, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
