//! HomeHNI domain logic.
//!
//! Pure, database-free building blocks shared by the repository and API
//! layers: the listing taxonomy, the search/filter pipeline, the
//! property-submission wizard state machine, the optimistic favorite-toggle
//! model, lead validation, and unit/price helpers.
//!
//! This crate has no internal dependencies so it can also back any future
//! CLI or worker tooling.

pub mod draft_wizard;
pub mod error;
pub mod favorites;
pub mod leads;
pub mod listing;
pub mod pricing;
pub mod roles;
pub mod search;
pub mod types;
pub mod units;
