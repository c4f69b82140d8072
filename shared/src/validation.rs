//! Validation utilities for the Umuhinzi yield prediction platform

use chrono::NaiveDate;

use crate::districts::district_center;

// ============================================================================
// Prediction Input Validations
// ============================================================================

/// Parse a planting date in `YYYY-MM-DD` form.
pub fn parse_planting_date(raw: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| "Planting date must be a valid YYYY-MM-DD date")
}

/// Reject planting dates strictly after `today`.
pub fn validate_not_future(planting: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if planting > today {
        return Err("Planting date cannot be in the future");
    }
    Ok(())
}

/// Validate that a district is in the lookup table.
pub fn validate_district(name: &str) -> Result<(), &'static str> {
    if district_center(name).is_none() {
        return Err("Unknown district");
    }
    Ok(())
}

/// Validate a crop name: non-empty, reasonable length.
pub fn validate_crop(crop: &str) -> Result<(), &'static str> {
    if crop.is_empty() {
        return Err("Crop name cannot be empty");
    }
    if crop.len() > 64 {
        return Err("Crop name too long");
    }
    Ok(())
}
