//! Ranked crop recommendations

use serde::{Deserialize, Serialize};

use crate::models::Crop;

/// Minimum score for the "recommended" bucket
pub const RECOMMENDED_THRESHOLD: f64 = 75.0;

/// Minimum score for the "good" bucket
pub const GOOD_THRESHOLD: f64 = 60.0;

/// A catalog crop extended with its suitability score and category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub crop: Crop,
    /// Suitability score in [0, 100]
    pub score: f64,
    pub category: RecommendationCategory,
}

impl Recommendation {
    pub fn new(crop: Crop, score: f64) -> Self {
        Self {
            crop,
            score,
            category: classify_by_score(score),
        }
    }

    /// Score rounded to a whole percentage for display
    pub fn score_percent(&self) -> u32 {
        self.score.round().clamp(0.0, 100.0) as u32
    }
}

/// Qualitative bucket derived from a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    /// score >= 75
    Recommended,
    /// 60 <= score < 75
    Good,
    /// score < 60
    Moderate,
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationCategory::Recommended => write!(f, "recommended"),
            RecommendationCategory::Good => write!(f, "good"),
            RecommendationCategory::Moderate => write!(f, "moderate"),
        }
    }
}

/// Classify a suitability score into its category
pub fn classify_by_score(score: f64) -> RecommendationCategory {
    if score >= RECOMMENDED_THRESHOLD {
        RecommendationCategory::Recommended
    } else if score >= GOOD_THRESHOLD {
        RecommendationCategory::Good
    } else {
        RecommendationCategory::Moderate
    }
}
