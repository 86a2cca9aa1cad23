//! Area unit conversions.
//!
//! All conversions route through square feet, the unit Indian property
//! listings are most commonly quoted in. Factors are the standard survey
//! definitions (1 guntha = 1089 sq ft, 1 cent = 435.6 sq ft).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Area units accepted by listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SqFt,
    SqM,
    SqYd,
    Acre,
    Hectare,
    Cent,
    Guntha,
}

impl AreaUnit {
    /// Parse a unit string from the database or a form field.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "sq_ft" => Ok(Self::SqFt),
            "sq_m" => Ok(Self::SqM),
            "sq_yd" => Ok(Self::SqYd),
            "acre" => Ok(Self::Acre),
            "hectare" => Ok(Self::Hectare),
            "cent" => Ok(Self::Cent),
            "guntha" => Ok(Self::Guntha),
            _ => Err(CoreError::Validation(format!(
                "Invalid area unit '{s}'. Must be one of: sq_ft, sq_m, sq_yd, acre, hectare, cent, guntha"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SqFt => "sq_ft",
            Self::SqM => "sq_m",
            Self::SqYd => "sq_yd",
            Self::Acre => "acre",
            Self::Hectare => "hectare",
            Self::Cent => "cent",
            Self::Guntha => "guntha",
        }
    }

    /// Square feet per one of this unit.
    fn sq_ft_factor(self) -> f64 {
        match self {
            Self::SqFt => 1.0,
            Self::SqM => 10.763_9,
            Self::SqYd => 9.0,
            Self::Acre => 43_560.0,
            Self::Hectare => 107_639.0,
            Self::Cent => 435.6,
            Self::Guntha => 1_089.0,
        }
    }
}

/// Convert an area value between units.
///
/// Negative input is rejected; zero passes through.
pub fn convert(value: f64, from: AreaUnit, to: AreaUnit) -> Result<f64, CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "Area value must be a non-negative number, got {value}"
        )));
    }
    Ok(value * from.sq_ft_factor() / to.sq_ft_factor())
}
