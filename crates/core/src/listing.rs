//! Listing taxonomy: kinds, intents, property types, and statuses.
//!
//! String forms match the CHECK constraints on the `listings` table; every
//! enum round-trips through `from_str_db` / `as_str`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Listing kind
// ---------------------------------------------------------------------------

/// Whether a listing advertises a property or a service provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Property,
    Service,
}

impl ListingKind {
    /// Parse a kind string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "property" => Ok(Self::Property),
            "service" => Ok(Self::Service),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing kind '{s}'. Must be one of: property, service"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Service => "service",
        }
    }
}

// ---------------------------------------------------------------------------
// Transaction intent
// ---------------------------------------------------------------------------

/// The transaction type a listing is offered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Buy,
    Sell,
    Rent,
    Lease,
    Service,
}

impl Intent {
    /// Parse an intent string from the database or a query parameter.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "rent" => Ok(Self::Rent),
            "lease" => Ok(Self::Lease),
            "service" => Ok(Self::Service),
            _ => Err(CoreError::Validation(format!(
                "Invalid intent '{s}'. Must be one of: buy, sell, rent, lease, service"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Rent => "rent",
            Self::Lease => "lease",
            Self::Service => "service",
        }
    }
}

// ---------------------------------------------------------------------------
// Property type
// ---------------------------------------------------------------------------

/// Property sub-type. `Others` doubles as a search sentinel meaning
/// "match any type"; see [`crate::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    Villa,
    Plot,
    Office,
    Shop,
    Others,
}

impl PropertyType {
    /// Parse a property type string from the database or a query parameter.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "apartment" => Ok(Self::Apartment),
            "villa" => Ok(Self::Villa),
            "plot" => Ok(Self::Plot),
            "office" => Ok(Self::Office),
            "shop" => Ok(Self::Shop),
            "others" => Ok(Self::Others),
            _ => Err(CoreError::Validation(format!(
                "Invalid property type '{s}'. Must be one of: apartment, villa, plot, office, shop, others"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::Villa => "villa",
            Self::Plot => "plot",
            Self::Office => "office",
            Self::Shop => "shop",
            Self::Others => "others",
        }
    }
}

// ---------------------------------------------------------------------------
// Moderation status
// ---------------------------------------------------------------------------

/// Moderation status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid listing status '{s}'. Must be one of: pending, approved, rejected"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Validate a moderation transition.
///
/// Approve and reject act on listings that are awaiting a decision
/// (`pending`) or reversing a prior decision (`rejected` -> `approved`,
/// `approved` -> `rejected`). Re-applying the current status is a no-op
/// conflict rather than a silent success.
pub fn validate_status_transition(
    current: ListingStatus,
    next: ListingStatus,
) -> Result<(), CoreError> {
    if next == ListingStatus::Pending {
        return Err(CoreError::Validation(
            "Listings return to 'pending' only through owner re-edit, not moderation".to_string(),
        ));
    }
    if current == next {
        return Err(CoreError::Conflict(format!(
            "Listing is already {}",
            current.as_str()
        )));
    }
    Ok(())
}

/// Check whether the owner may still edit a listing.
///
/// Approved listings are live and immutable to the owner; edits would
/// bypass moderation.
pub fn owner_can_edit(status: ListingStatus) -> bool {
    matches!(status, ListingStatus::Pending | ListingStatus::Rejected)
}
