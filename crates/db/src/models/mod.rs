//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod draft;
pub mod event;
pub mod favorite;
pub mod lead;
pub mod listing;
pub mod session;
pub mod user;
