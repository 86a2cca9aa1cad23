//! Repository for the `listings` table.

use homehni_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::{Listing, UpdateListing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, kind, intent, property_type, title, description, price, \
     country, state, city, locality, bedrooms, bathrooms, area_value, area_unit, \
     amenities, media, status, rejection_reason, created_at, updated_at";

/// Provides CRUD and moderation operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Find a listing by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the full approved candidate set for the search pipeline.
    ///
    /// Ordering is newest-first so the pipeline's stable sort keeps recent
    /// listings ahead among relevance ties.
    pub async fn list_approved(pool: &PgPool) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings WHERE status = 'approved' ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Listing>(&query).fetch_all(pool).await
    }

    /// List a user's own listings, any status, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List listings by moderation status (admin queue), oldest first so the
    /// queue is worked in submission order.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listings WHERE status = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count listings with the given status.
    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM listings WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Apply a moderation decision.
    ///
    /// `rejection_reason` is stored on reject and cleared on approve.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET status = $2, rejection_reason = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(status)
            .bind(rejection_reason)
            .fetch_optional(pool)
            .await
    }

    /// Owner re-edit. Only non-`None` fields are applied; the listing
    /// returns to `pending` so edits pass moderation again.
    pub async fn update_by_owner(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        // `price` distinguishes "leave unchanged" (outer None) from "set to
        // price-on-request" (Some(None)), so COALESCE alone cannot express
        // it; an explicit flag drives the CASE.
        let query = format!(
            "UPDATE listings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = CASE WHEN $4 THEN $5 ELSE price END,
                locality = COALESCE($6, locality),
                bedrooms = COALESCE($7, bedrooms),
                bathrooms = COALESCE($8, bathrooms),
                area_value = COALESCE($9, area_value),
                area_unit = COALESCE($10, area_unit),
                amenities = COALESCE($11, amenities),
                media = COALESCE($12, media),
                status = 'pending',
                rejection_reason = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price.is_some())
            .bind(input.price.flatten())
            .bind(&input.locality)
            .bind(input.bedrooms)
            .bind(input.bathrooms)
            .bind(input.area_value)
            .bind(&input.area_unit)
            .bind(&input.amenities)
            .bind(&input.media)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
