//! Lead-capture payload validation.
//!
//! Leads arrive from a public, unauthenticated form; everything here is
//! treated as hostile input and validated before it reaches the database.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Phone numbers: optional leading `+`, then 7 to 15 digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"));

/// An incoming lead submission, pre-validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewLead {
    #[validate(length(min = 1, max = 120, message = "Name is required (max 120 characters)"))]
    pub name: String,

    #[validate(regex(path = *PHONE_RE, message = "Phone must be 7-15 digits"))]
    pub phone: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(max = 2000, message = "Message is too long (max 2000 characters)"))]
    pub message: Option<String>,

    /// The listing the lead is about, when it came from a listing page.
    pub listing_id: Option<DbId>,
}

impl NewLead {
    /// Validate the payload, normalizing whitespace first.
    ///
    /// Returns the trimmed payload on success so the stored lead never
    /// carries padding the form widget let through.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.email = self.email.trim().to_string();
        self.message = self
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        self.validate().map_err(|errors| {
            // Surface the first field message; the form shows one error at
            // a time.
            let message = errors
                .field_errors()
                .into_iter()
                .flat_map(|(_, errs)| errs.iter())
                .filter_map(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .next()
                .unwrap_or_else(|| "Invalid lead payload".to_string());
            CoreError::Validation(message)
        })?;

        Ok(self)
    }
}
