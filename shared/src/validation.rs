//! Validation utilities for the Smart Crop Advisor

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::FarmCondition;

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate an "N-P-K" ratio: three non-negative numbers separated by '-'
pub fn validate_npk_ratio(ratio: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = ratio.split('-').collect();
    if parts.len() != 3 {
        return Err("NPK ratio must have three components separated by '-'");
    }
    for part in parts {
        let value: f64 = part
            .trim()
            .parse()
            .map_err(|_| "NPK ratio components must be numbers")?;
        if !value.is_finite() || value < 0.0 {
            return Err("NPK ratio components cannot be negative");
        }
    }
    Ok(())
}

// ============================================================================
// Farm Condition Validations
// ============================================================================

/// Validate soil pH is on the pH scale
pub fn validate_ph(ph: f64) -> Result<(), &'static str> {
    if !(1.0..=14.0).contains(&ph) {
        return Err("pH must be between 1 and 14");
    }
    Ok(())
}

/// Validate annual rainfall in millimeters
pub fn validate_rainfall(rainfall_mm: f64) -> Result<(), &'static str> {
    if !rainfall_mm.is_finite() || rainfall_mm < 0.0 {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Validate farm size in acres
pub fn validate_farm_size(acres: f64) -> Result<(), &'static str> {
    if !acres.is_finite() || acres <= 0.0 {
        return Err("Farm size must be greater than 0");
    }
    Ok(())
}

/// Validate temperature is a real reading
pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !celsius.is_finite() {
        return Err("Temperature must be a number");
    }
    Ok(())
}

/// Validate a full condition record before scoring.
/// Text fields go through the `Validate` derive, numeric fields through the
/// validators above, each error keyed by its field name.
pub fn validate_condition(condition: &FarmCondition) -> Result<(), ValidationErrors> {
    let mut errors = condition.validate().err().unwrap_or_else(ValidationErrors::new);

    let checks = [
        ("ph_level", validate_ph(condition.ph_level)),
        ("rainfall_mm", validate_rainfall(condition.rainfall_mm)),
        ("temperature_celsius", validate_temperature(condition.temperature_celsius)),
        ("farm_size_acres", validate_farm_size(condition.farm_size_acres)),
    ];
    for (field, result) in checks {
        if let Err(message) = result {
            let mut error = ValidationError::new("range");
            error.message = Some(message.into());
            errors.add(field, error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Soil types offered by the recommendation form
pub const KNOWN_SOIL_TYPES: &[&str] = &["clay", "sandy", "loam", "sandy loam", "black soil"];

/// Whether the soil type is one the form offers (case-insensitive)
pub fn is_known_soil_type(soil_type: &str) -> bool {
    let soil_lower = soil_type.trim().to_lowercase();
    KNOWN_SOIL_TYPES.iter().any(|s| *s == soil_lower)
}
