//! Property-submission wizard: step definitions, transition rules, step-data
//! validation, and the resume decision.
//!
//! A draft is one mutable slot per user. Step data accumulates in a JSONB
//! object keyed by per-step namespaces (`property_details`, `location`, ...),
//! so saving one step never clobbers another. The terminal states are row
//! absence: submission converts the draft into a listing and deletes it,
//! discard just deletes it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::listing::{Intent, ListingKind, PropertyType};
use crate::units::AreaUnit;

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// The seven steps of the submission wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PropertyDetails,
    Location,
    Pricing,
    Amenities,
    Gallery,
    Schedule,
    Preview,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 7;

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::PropertyDetails),
            2 => Ok(Self::Location),
            3 => Ok(Self::Pricing),
            4 => Ok(Self::Amenities),
            5 => Ok(Self::Gallery),
            6 => Ok(Self::Schedule),
            7 => Ok(Self::Preview),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::PropertyDetails => 1,
            Self::Location => 2,
            Self::Pricing => 3,
            Self::Amenities => 4,
            Self::Gallery => 5,
            Self::Schedule => 6,
            Self::Preview => 7,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::PropertyDetails => "Property Details",
            Self::Location => "Location",
            Self::Pricing => "Pricing",
            Self::Amenities => "Amenities",
            Self::Gallery => "Gallery",
            Self::Schedule => "Schedule",
            Self::Preview => "Preview",
        }
    }
}

// ---------------------------------------------------------------------------
// Step data namespaces
// ---------------------------------------------------------------------------

/// JSON key for step 1 data (title, kind, intent, property type, ...).
pub const STEP_DATA_KEY_PROPERTY_DETAILS: &str = "property_details";

/// JSON key for step 2 data (country, state, city, locality).
pub const STEP_DATA_KEY_LOCATION: &str = "location";

/// JSON key for step 3 data (expected price or price-on-request flag).
pub const STEP_DATA_KEY_PRICING: &str = "pricing";

/// JSON key for step 4 data (amenity name array).
pub const STEP_DATA_KEY_AMENITIES: &str = "amenities";

/// JSON key for step 5 data (ordered media URL array).
pub const STEP_DATA_KEY_GALLERY: &str = "gallery";

/// JSON key for step 6 data (visit availability object).
pub const STEP_DATA_KEY_SCHEDULE: &str = "schedule";

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Validate a step transition.
///
/// A transition is valid if the next step is exactly one step forward or
/// one step backward from the current step. Jumping more than one step in
/// either direction is not allowed.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    if current < MIN_STEP || current > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Current step {current} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    if next < MIN_STEP || next > MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Next step {next} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }

    let diff = (next as i16) - (current as i16);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }

    Ok(())
}

/// Check if a draft can be submitted (must be on the Preview step).
pub fn can_submit(current_step: u8) -> Result<(), CoreError> {
    if current_step != MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Cannot submit: must be on step {MAX_STEP} (Preview), \
             currently on step {current_step}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Step data validation
// ---------------------------------------------------------------------------

/// Validate that step data holds what a forward transition out of `step`
/// requires.
///
/// Back navigation never validates; only "Next" calls this. Validation is
/// per-namespace, so a draft may carry garbage in namespaces belonging to
/// steps it has not reached yet.
pub fn validate_step_data(step: u8, data: &serde_json::Value) -> Result<(), CoreError> {
    let step_enum = WizardStep::from_number(step)?;
    let obj = data
        .as_object()
        .ok_or_else(|| CoreError::Validation("Step data must be a JSON object".to_string()))?;

    match step_enum {
        WizardStep::PropertyDetails => {
            let details = obj
                .get(STEP_DATA_KEY_PROPERTY_DETAILS)
                .and_then(|v| v.as_object())
                .ok_or_else(|| {
                    CoreError::Validation(
                        "Step 1 (Property Details) requires 'property_details' data".to_string(),
                    )
                })?;

            let title = details.get("title").and_then(|v| v.as_str()).unwrap_or("");
            if title.trim().is_empty() {
                return Err(CoreError::Validation("Title is required".to_string()));
            }

            let kind_str = details.get("kind").and_then(|v| v.as_str()).ok_or_else(|| {
                CoreError::Validation("Listing kind is required".to_string())
            })?;
            let kind = ListingKind::from_str_db(kind_str)?;

            let intent_str = details
                .get("intent")
                .and_then(|v| v.as_str())
                .ok_or_else(|| CoreError::Validation("Intent is required".to_string()))?;
            Intent::from_str_db(intent_str)?;

            // Service listings have no property type; property listings must
            // pick one.
            if kind == ListingKind::Property {
                let pt = details
                    .get("property_type")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        CoreError::Validation(
                            "Property type is required for property listings".to_string(),
                        )
                    })?;
                PropertyType::from_str_db(pt)?;
            }
        }
        WizardStep::Location => {
            let location = obj
                .get(STEP_DATA_KEY_LOCATION)
                .and_then(|v| v.as_object())
                .ok_or_else(|| {
                    CoreError::Validation("Step 2 (Location) requires 'location' data".to_string())
                })?;

            for field in ["country", "state", "city"] {
                let value = location.get(field).and_then(|v| v.as_str()).unwrap_or("");
                if value.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Location field '{field}' is required"
                    )));
                }
            }
        }
        WizardStep::Pricing => {
            let pricing = obj
                .get(STEP_DATA_KEY_PRICING)
                .and_then(|v| v.as_object())
                .ok_or_else(|| {
                    CoreError::Validation("Step 3 (Pricing) requires 'pricing' data".to_string())
                })?;

            let on_request = pricing
                .get("price_on_request")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let price = pricing.get("expected_price").and_then(|v| v.as_i64());

            if !on_request && !price.is_some_and(|p| p > 0) {
                return Err(CoreError::Validation(
                    "Pricing requires a positive expected price or 'price on request'".to_string(),
                ));
            }
        }
        WizardStep::Amenities => {
            // An empty array is a valid answer ("no amenities").
            if !obj
                .get(STEP_DATA_KEY_AMENITIES)
                .is_some_and(|v| v.is_array())
            {
                return Err(CoreError::Validation(
                    "Step 4 (Amenities) requires an 'amenities' array".to_string(),
                ));
            }
        }
        WizardStep::Gallery => {
            // Media is optional but the key must be answered, even if empty.
            if !obj.get(STEP_DATA_KEY_GALLERY).is_some_and(|v| v.is_array()) {
                return Err(CoreError::Validation(
                    "Step 5 (Gallery) requires a 'gallery' array".to_string(),
                ));
            }
        }
        WizardStep::Schedule => {
            if !obj
                .get(STEP_DATA_KEY_SCHEDULE)
                .is_some_and(|v| v.is_object())
            {
                return Err(CoreError::Validation(
                    "Step 6 (Schedule) requires a 'schedule' object".to_string(),
                ));
            }
        }
        WizardStep::Preview => {
            // Step 7 collects nothing; submission re-validates everything.
        }
    }

    Ok(())
}

/// Check whether the current step can be advanced based on step data.
pub fn can_advance_step(step: u8, step_data: &serde_json::Value) -> bool {
    validate_step_data(step, step_data).is_ok()
}

// ---------------------------------------------------------------------------
// Partial merge
// ---------------------------------------------------------------------------

/// Shallow-merge a partial update into accumulated step data.
///
/// Merging is by top-level namespace key: an update that only carries
/// `amenities` leaves a previously saved `location` untouched. A namespace
/// present in the update replaces that namespace wholesale.
///
/// The repository compares the merged result against the stored value to
/// make re-saving identical data an observable no-op.
pub fn merge_step_data(
    existing: &serde_json::Value,
    update: &serde_json::Value,
) -> Result<serde_json::Value, CoreError> {
    let mut merged = existing
        .as_object()
        .cloned()
        .ok_or_else(|| CoreError::Validation("Step data must be a JSON object".to_string()))?;
    let update = update
        .as_object()
        .ok_or_else(|| CoreError::Validation("Step data update must be a JSON object".to_string()))?;

    for (key, value) in update {
        merged.insert(key.clone(), value.clone());
    }

    Ok(serde_json::Value::Object(merged))
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// The fully validated record extracted from an accumulated draft.
///
/// Produced by [`validate_submission`]; consumed by the repository layer
/// which inserts the pending listing and deletes the draft in one
/// transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionData {
    pub kind: ListingKind,
    pub intent: Intent,
    pub property_type: Option<PropertyType>,
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
}

/// Validate the full accumulated draft and extract the listing record.
///
/// Every data-bearing step's namespace is re-checked, so a draft that was
/// forced forward with stale data still cannot become a listing.
pub fn validate_submission(step_data: &serde_json::Value) -> Result<SubmissionData, CoreError> {
    for step in MIN_STEP..MAX_STEP {
        validate_step_data(step, step_data)?;
    }

    // validate_step_data guarantees these namespaces exist and are shaped
    // correctly, so plain indexing below cannot miss.
    let details = &step_data[STEP_DATA_KEY_PROPERTY_DETAILS];
    let location = &step_data[STEP_DATA_KEY_LOCATION];
    let pricing = &step_data[STEP_DATA_KEY_PRICING];

    let kind = ListingKind::from_str_db(details["kind"].as_str().unwrap_or_default())?;
    let intent = Intent::from_str_db(details["intent"].as_str().unwrap_or_default())?;
    let property_type = match details.get("property_type").and_then(|v| v.as_str()) {
        Some(pt) => Some(PropertyType::from_str_db(pt)?),
        None => None,
    };

    let on_request = pricing
        .get("price_on_request")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let price = if on_request {
        None
    } else {
        pricing.get("expected_price").and_then(|v| v.as_i64())
    };

    Ok(SubmissionData {
        kind,
        intent,
        property_type,
        title: details["title"].as_str().unwrap_or_default().trim().to_string(),
        description: details
            .get("description")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        price,
        country: location["country"].as_str().unwrap_or_default().trim().to_string(),
        state: location["state"].as_str().unwrap_or_default().trim().to_string(),
        city: location["city"].as_str().unwrap_or_default().trim().to_string(),
        locality: location
            .get("locality")
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        bedrooms: room_count(details, "bedrooms")?,
        bathrooms: room_count(details, "bathrooms")?,
        area_value: match details.get("area_value").and_then(|v| v.as_f64()) {
            None => None,
            Some(v) if v.is_finite() && v > 0.0 => Some(v),
            Some(v) => {
                return Err(CoreError::Validation(format!(
                    "Area value must be a positive number, got {v}"
                )))
            }
        },
        area_unit: match details.get("area_unit").and_then(|v| v.as_str()) {
            // Normalize through the unit enum so only known units are stored.
            Some(unit) => Some(AreaUnit::from_str_db(unit)?.as_str().to_string()),
            None => None,
        },
        amenities: string_array(&step_data[STEP_DATA_KEY_AMENITIES]),
        media: string_array(&step_data[STEP_DATA_KEY_GALLERY]),
    })
}

/// Extract an optional room count, rejecting negatives and values that do
/// not fit the stored i32 column.
fn room_count(details: &serde_json::Value, field: &str) -> Result<Option<i32>, CoreError> {
    match details.get(field).and_then(|v| v.as_i64()) {
        None => Ok(None),
        Some(n) => i32::try_from(n)
            .ok()
            .filter(|count| *count >= 0)
            .map(Some)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Field '{field}' must be a non-negative integer, got {n}"
                ))
            }),
    }
}

fn string_array(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Resume
// ---------------------------------------------------------------------------

/// A draft snapshot the client cached on-device.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CachedDraft {
    pub current_step: i32,
    pub step_data: serde_json::Value,
}

impl CachedDraft {
    /// Whether the snapshot is structurally usable as a server draft.
    pub fn is_structurally_valid(&self) -> bool {
        (MIN_STEP as i32..=MAX_STEP as i32).contains(&self.current_step)
            && self.step_data.is_object()
    }
}

/// The outcome of entering the wizard with possible prior state.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeDecision {
    /// A server draft exists; it is authoritative, resume at its step.
    ContinueServer,
    /// No server draft, but the client's cached snapshot is usable; adopt
    /// it as the new server row.
    AdoptCache(CachedDraft),
    /// Nothing to resume; start a fresh draft at step 1.
    StartFresh,
}

/// Decide how to resume the wizard.
///
/// The server row always wins over the device cache; the cache is a
/// fallback for drafts whose remote save never landed.
pub fn resolve_resume(server_present: bool, cached: Option<CachedDraft>) -> ResumeDecision {
    if server_present {
        return ResumeDecision::ContinueServer;
    }
    match cached {
        Some(snapshot) if snapshot.is_structurally_valid() => ResumeDecision::AdoptCache(snapshot),
        _ => ResumeDecision::StartFresh,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
