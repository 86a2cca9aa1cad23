//! Request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod drafts;
pub mod favorites;
pub mod leads;
pub mod listings;
pub mod me;
