//! Crop recommendation service
//!
//! Validates a farm condition, scores the catalog and explains individual
//! scores.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{
    base_score, classify_by_score, is_known_soil_type, recommend, score_breakdown, Catalog,
    FarmCondition, Jitter, NoJitter, RandomJitter, Recommendation, RecommendationCategory,
    validate_condition, ScoreAdjustment, BASELINE_SCORE, MAX_SCORE, MIN_SCORE,
};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::error::{AppError, AppResult};

/// Recommendation service
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Catalog,
    scoring: ScoringConfig,
}

/// Ranked recommendations for one submission
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub condition: FarmCondition,
    pub recommendations: Vec<Recommendation>,
}

/// Rule-by-rule explanation of one crop's score (without jitter)
#[derive(Debug, Serialize)]
pub struct ScoreExplanation {
    pub crop_id: u32,
    pub crop_name: String,
    pub baseline: f64,
    pub adjustments: Vec<ScoreAdjustment>,
    /// Rule sum before clamping
    pub raw_score: f64,
    /// Score clamped to [0, 100]
    pub score: f64,
    pub category: RecommendationCategory,
}

impl RecommendationService {
    pub fn new(catalog: Catalog, scoring: ScoringConfig) -> Self {
        Self { catalog, scoring }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fresh jitter source for one request
    fn jitter(&self) -> Box<dyn Jitter + Send> {
        match (self.scoring.jitter_enabled, self.scoring.jitter_seed) {
            (false, _) => Box::new(NoJitter),
            (true, Some(seed)) => Box::new(RandomJitter::seeded(seed)),
            (true, None) => Box::new(RandomJitter::from_entropy()),
        }
    }

    /// Score the catalog against a condition and return the top crops
    pub fn recommend(&self, condition: FarmCondition) -> AppResult<RecommendationResponse> {
        validate_condition(&condition)?;

        if !is_known_soil_type(&condition.soil_type) {
            tracing::debug!(
                "Soil type '{}' is not one of the form options",
                condition.soil_type
            );
        }

        let mut jitter = self.jitter();
        let recommendations = recommend(&condition, &self.catalog, jitter.as_mut());

        let request_id = Uuid::new_v4();
        match recommendations.first() {
            Some(top) => tracing::info!(
                %request_id,
                location = %condition.location,
                season = %condition.season,
                "Top recommendation: {} ({:.1})",
                top.crop.name,
                top.score
            ),
            None => tracing::warn!(%request_id, "Catalog is empty, no recommendations"),
        }

        Ok(RecommendationResponse {
            request_id,
            generated_at: Utc::now(),
            condition,
            recommendations,
        })
    }

    /// Explain the deterministic part of a crop's score
    pub fn explain(&self, crop_id: u32, condition: &FarmCondition) -> AppResult<ScoreExplanation> {
        validate_condition(condition)?;

        let crop = self
            .catalog
            .get(crop_id)
            .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id)))?;

        let raw_score = base_score(crop, condition);
        let score = raw_score.clamp(MIN_SCORE, MAX_SCORE);

        Ok(ScoreExplanation {
            crop_id: crop.id,
            crop_name: crop.name.clone(),
            baseline: BASELINE_SCORE,
            adjustments: score_breakdown(crop, condition),
            raw_score,
            score,
            category: classify_by_score(score),
        })
    }
}
