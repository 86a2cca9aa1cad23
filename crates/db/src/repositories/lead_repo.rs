//! Repository for the `leads` table (enquiries from prospective buyers).

use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead};

const COLUMNS: &str = "id, listing_id, name, phone, email, message, created_at";

/// Provides lead capture and admin listing.
pub struct LeadRepo;

impl LeadRepo {
    /// Record a new lead. Validation happens before this call.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (listing_id, name, phone, email, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(input.listing_id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Recent leads for the admin panel, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total lead count.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await
    }
}
