//! Repository for the `favorites` table.

use homehni_core::types::DbId;
use sqlx::PgPool;

use crate::models::listing::Listing;

/// Provides favorite persistence, including the atomic toggle.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Atomically toggle a favorite and return the resulting server state
    /// (`true` = now favorited).
    ///
    /// The delete-then-maybe-insert runs in one transaction so concurrent
    /// toggles for the same (user, listing) pair cannot double-insert past
    /// `uq_favorites_user_listing`.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        listing_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM favorites WHERE user_id = $1 AND listing_id = $2",
        )
        .bind(user_id)
        .bind(listing_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let favorited = if removed == 0 {
            sqlx::query("INSERT INTO favorites (user_id, listing_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(listing_id)
                .execute(&mut *tx)
                .await?;
            true
        } else {
            false
        };

        tx.commit().await?;
        Ok(favorited)
    }

    /// Whether the user has favorited the listing.
    pub async fn is_favorited(
        pool: &PgPool,
        user_id: DbId,
        listing_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND listing_id = $2)",
        )
        .bind(user_id)
        .bind(listing_id)
        .fetch_one(pool)
        .await
    }

    /// The user's favorited listings, most recently favorited first.
    ///
    /// Joins through to listings so delisted rows drop out naturally.
    pub async fn list_listings_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Listing>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT l.id, l.owner_id, l.kind, l.intent, l.property_type, l.title, \
                    l.description, l.price, l.country, l.state, l.city, l.locality, \
                    l.bedrooms, l.bathrooms, l.area_value, l.area_unit, l.amenities, \
                    l.media, l.status, l.rejection_reason, l.created_at, l.updated_at \
             FROM favorites f \
             JOIN listings l ON l.id = f.listing_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// IDs of the listings the user has favorited (for flagging search
    /// results without a second join).
    pub async fn list_listing_ids_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT listing_id FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
