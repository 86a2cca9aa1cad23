//! Listing entity model and DTOs.

use homehni_core::error::CoreError;
use homehni_core::listing::{Intent, PropertyType};
use homehni_core::search::Searchable;
use homehni_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `listings` table.
///
/// Enum-like columns (`kind`, `intent`, `property_type`, `status`) are
/// stored as strings guarded by CHECK constraints; parse them with the
/// `from_str_db` constructors in `homehni_core::listing`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub owner_id: DbId,
    pub kind: String,
    pub intent: String,
    pub property_type: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// `None` means "price on request".
    pub price: Option<i64>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub locality: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_value: Option<f64>,
    pub area_unit: Option<String>,
    pub amenities: Vec<String>,
    pub media: Vec<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Listing {
    /// Build the typed view the search pipeline filters and ranks over.
    ///
    /// Fails only if a row violates its own CHECK constraints, which would
    /// mean the database and the enum definitions have drifted.
    pub fn search_candidate(&self) -> Result<SearchCandidate<'_>, CoreError> {
        Ok(SearchCandidate {
            listing: self,
            intent: Intent::from_str_db(&self.intent)?,
            property_type: self
                .property_type
                .as_deref()
                .map(PropertyType::from_str_db)
                .transpose()?,
        })
    }
}

/// A borrowed, typed view of a [`Listing`] for the search pipeline.
#[derive(Debug)]
pub struct SearchCandidate<'a> {
    pub listing: &'a Listing,
    intent: Intent,
    property_type: Option<PropertyType>,
}

impl Searchable for SearchCandidate<'_> {
    fn intent(&self) -> Intent {
        self.intent
    }
    fn property_type(&self) -> Option<PropertyType> {
        self.property_type
    }
    fn country(&self) -> &str {
        &self.listing.country
    }
    fn state(&self) -> &str {
        &self.listing.state
    }
    fn city(&self) -> &str {
        &self.listing.city
    }
    fn price(&self) -> Option<i64> {
        self.listing.price
    }
    fn bedrooms(&self) -> Option<i32> {
        self.listing.bedrooms
    }
}

/// DTO for an owner re-edit of a pending/rejected listing.
///
/// All fields are optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Option<i64>>,
    pub locality: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_value: Option<f64>,
    pub area_unit: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub media: Option<Vec<String>>,
}
