//! Farm condition submitted by a farmer

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Season;
use crate::types::GpsCoordinates;

/// Snapshot of soil, climate and resources for one recommendation request.
/// Built once per submission and never mutated afterwards.
///
/// The derive covers the text fields only; use
/// [`validate_condition`](crate::validation::validate_condition) for the
/// full check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct FarmCondition {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GpsCoordinates>,
    #[validate(length(min = 1, message = "Soil type is required"))]
    pub soil_type: String,
    pub ph_level: f64,
    pub rainfall_mm: f64,
    pub temperature_celsius: f64,
    pub season: Season,
    pub farm_size_acres: f64,
    pub irrigation: IrrigationMethod,
    pub budget: BudgetTier,
    /// Farming experience. Informational only, not used by scoring.
    #[serde(default)]
    pub experience: String,
}

/// Irrigation method available on the farm
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMethod {
    Rainfed,
    Irrigated,
    Drip,
    Sprinkler,
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationMethod::Rainfed => write!(f, "rainfed"),
            IrrigationMethod::Irrigated => write!(f, "irrigated"),
            IrrigationMethod::Drip => write!(f, "drip"),
            IrrigationMethod::Sprinkler => write!(f, "sprinkler"),
        }
    }
}

/// Input budget tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    /// ₹0-10,000
    Low,
    /// ₹10,000-50,000
    Medium,
    /// ₹50,000+
    High,
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetTier::Low => write!(f, "low"),
            BudgetTier::Medium => write!(f, "medium"),
            BudgetTier::High => write!(f, "high"),
        }
    }
}
