//! Repository for the `drafts` table (one wizard slot per user).

use homehni_core::draft_wizard::SubmissionData;
use homehni_core::types::DbId;
use sqlx::PgPool;

use crate::models::draft::Draft;
use crate::models::listing::Listing;

const COLUMNS: &str = "id, user_id, current_step, step_data, created_at, updated_at";

/// Provides draft lifecycle operations. A user holds at most one draft,
/// enforced by `uq_drafts_user_id`.
pub struct DraftRepo;

impl DraftRepo {
    /// Create a fresh draft at step 1 with empty step data.
    ///
    /// A second draft for the same user violates `uq_drafts_user_id`.
    pub async fn create(pool: &PgPool, user_id: DbId) -> Result<Draft, sqlx::Error> {
        let query = format!(
            "INSERT INTO drafts (user_id) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Draft>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Create a draft pre-populated from an adopted device cache.
    pub async fn create_from_cache(
        pool: &PgPool,
        user_id: DbId,
        current_step: i32,
        step_data: &serde_json::Value,
    ) -> Result<Draft, sqlx::Error> {
        let query = format!(
            "INSERT INTO drafts (user_id, current_step, step_data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Draft>(&query)
            .bind(user_id)
            .bind(current_step)
            .bind(step_data)
            .fetch_one(pool)
            .await
    }

    /// Find the user's current draft, if one exists.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Draft>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drafts WHERE user_id = $1");
        sqlx::query_as::<_, Draft>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the accumulated step data. The caller merges first; this
    /// stores the merged object wholesale.
    pub async fn update_step_data(
        pool: &PgPool,
        user_id: DbId,
        step_data: &serde_json::Value,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let query = format!(
            "UPDATE drafts SET step_data = $2 WHERE user_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Draft>(&query)
            .bind(user_id)
            .bind(step_data)
            .fetch_optional(pool)
            .await
    }

    /// Move the draft to a new step. Transition validity is checked in the
    /// handler before this runs.
    pub async fn update_step(
        pool: &PgPool,
        user_id: DbId,
        current_step: i32,
    ) -> Result<Option<Draft>, sqlx::Error> {
        let query = format!(
            "UPDATE drafts SET current_step = $2 WHERE user_id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Draft>(&query)
            .bind(user_id)
            .bind(current_step)
            .fetch_optional(pool)
            .await
    }

    /// Discard the user's draft. Returns `true` if a row was removed.
    pub async fn delete_by_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drafts WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Convert a validated draft into a pending listing.
    ///
    /// The listing insert and the draft delete commit together; a failure
    /// in either leaves both the draft and the listings table untouched.
    pub async fn submit(
        pool: &PgPool,
        user_id: DbId,
        data: &SubmissionData,
    ) -> Result<Listing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let listing = sqlx::query_as::<_, Listing>(
            "INSERT INTO listings \
                (owner_id, kind, intent, property_type, title, description, price, \
                 country, state, city, locality, bedrooms, bathrooms, area_value, \
                 area_unit, amenities, media, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     $15, $16, $17, 'pending') \
             RETURNING id, owner_id, kind, intent, property_type, title, description, \
                 price, country, state, city, locality, bedrooms, bathrooms, \
                 area_value, area_unit, amenities, media, status, rejection_reason, \
                 created_at, updated_at",
        )
        .bind(user_id)
        .bind(data.kind.as_str())
        .bind(data.intent.as_str())
        .bind(data.property_type.map(|pt| pt.as_str()))
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.country)
        .bind(&data.state)
        .bind(&data.city)
        .bind(&data.locality)
        .bind(data.bedrooms)
        .bind(data.bathrooms)
        .bind(data.area_value)
        .bind(&data.area_unit)
        .bind(&data.amenities)
        .bind(&data.media)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM drafts WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(listing)
    }
}
