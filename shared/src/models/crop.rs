//! Crop catalog entries

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Language;

/// A crop in the reference catalog. Never mutated once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub id: u32,
    pub name: String,
    pub season: Season,
    pub soil_type: String,
    pub water_requirement: WaterRequirement,
    /// Nutrient proportions as "N-P-K", e.g. "120-60-40" (kg/ha)
    pub npk_ratio: String,
    /// Expected yield in kg per acre
    pub yield_per_acre: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub benefits: Benefits,
}

impl Crop {
    /// Nitrogen component of the NPK ratio, if the ratio is well formed
    pub fn nitrogen_rate(&self) -> Option<f64> {
        let first = self.npk_ratio.split('-').next()?.trim();
        first.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Whether the crop can be sown in the requested season
    pub fn grows_in(&self, season: Season) -> bool {
        self.season == season || self.season.is_wildcard()
    }

    /// Case-insensitive soil comparison. Whitespace is significant.
    pub fn suits_soil(&self, soil_type: &str) -> bool {
        self.soil_type.to_lowercase() == soil_type.to_lowercase()
    }
}

/// Cropping season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    /// Monsoon season (June-October)
    #[serde(alias = "kharif")]
    Kharif,
    /// Winter season (October-March)
    #[serde(alias = "rabi")]
    Rabi,
    /// Summer season (March-June)
    #[serde(alias = "zaid")]
    Zaid,
    /// Grown in both Kharif and Rabi
    #[serde(alias = "both")]
    Both,
    /// Perennial / year-round
    #[serde(alias = "annual")]
    Annual,
}

impl Season {
    /// "Both" and "Annual" match any requested season
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Season::Both | Season::Annual)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Kharif => write!(f, "Kharif"),
            Season::Rabi => write!(f, "Rabi"),
            Season::Zaid => write!(f, "Zaid"),
            Season::Both => write!(f, "Both"),
            Season::Annual => write!(f, "Annual"),
        }
    }
}

impl FromStr for Season {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Ok(Season::Kharif),
            "rabi" => Ok(Season::Rabi),
            "zaid" => Ok(Season::Zaid),
            "both" => Ok(Season::Both),
            "annual" => Ok(Season::Annual),
            _ => Err("Unknown season"),
        }
    }
}

/// Water requirement of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WaterRequirement {
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    High,
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterRequirement::Low => write!(f, "Low"),
            WaterRequirement::Medium => write!(f, "Medium"),
            WaterRequirement::High => write!(f, "High"),
        }
    }
}

/// Benefit bullet points in each supported language
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Benefits {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub hi: Vec<String>,
    #[serde(default)]
    pub te: Vec<String>,
}

impl Benefits {
    pub fn for_language(&self, language: Language) -> &[String] {
        match language {
            Language::English => &self.en,
            Language::Hindi => &self.hi,
            Language::Telugu => &self.te,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(npk: &str) -> Crop {
        Crop {
            id: 1,
            name: "Rice (Paddy)".to_string(),
            season: Season::Kharif,
            soil_type: "Clay".to_string(),
            water_requirement: WaterRequirement::High,
            npk_ratio: npk.to_string(),
            yield_per_acre: 2200.0,
            icon: String::new(),
            benefits: Benefits::default(),
        }
    }

    #[test]
    fn test_nitrogen_rate() {
        assert_eq!(crop("120-60-40").nitrogen_rate(), Some(120.0));
        assert_eq!(crop(" 180 - 80-60").nitrogen_rate(), Some(180.0));
        assert_eq!(crop("abc-60-40").nitrogen_rate(), None);
        assert_eq!(crop("").nitrogen_rate(), None);
    }

    #[test]
    fn test_season_wildcards() {
        let mut c = crop("120-60-40");
        assert!(c.grows_in(Season::Kharif));
        assert!(!c.grows_in(Season::Rabi));

        c.season = Season::Both;
        assert!(c.grows_in(Season::Rabi));
        assert!(c.grows_in(Season::Zaid));

        c.season = Season::Annual;
        assert!(c.grows_in(Season::Kharif));
    }

    #[test]
    fn test_soil_case_insensitive() {
        let c = crop("120-60-40");
        assert!(c.suits_soil("clay"));
        assert!(c.suits_soil("CLAY"));
        assert!(!c.suits_soil("sandy"));
        assert!(!c.suits_soil(" clay"));
        assert!(!c.suits_soil("clay "));
    }

    #[test]
    fn test_water_requirement_parsing() {
        let high: WaterRequirement = serde_json::from_str("\"High\"").unwrap();
        let low: WaterRequirement = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(high, WaterRequirement::High);
        assert_eq!(low, WaterRequirement::Low);
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("kharif".parse::<Season>(), Ok(Season::Kharif));
        assert_eq!("Annual".parse::<Season>(), Ok(Season::Annual));
        assert!("monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn test_benefits_for_language() {
        let benefits = Benefits {
            en: vec!["Staple food".to_string()],
            hi: vec!["मुख्य भोजन".to_string()],
            te: vec![],
        };
        assert_eq!(benefits.for_language(Language::Hindi), ["मुख्य भोजन".to_string()]);
        assert!(benefits.for_language(Language::Telugu).is_empty());
    }
}
