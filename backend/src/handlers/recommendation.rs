//! HTTP handlers for crop recommendation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::FarmCondition;

use crate::error::AppResult;
use crate::services::recommendation::{RecommendationResponse, ScoreExplanation};
use crate::AppState;

/// Score the catalog against submitted farm conditions
pub async fn create_recommendations(
    State(state): State<AppState>,
    Json(condition): Json<FarmCondition>,
) -> AppResult<Json<RecommendationResponse>> {
    let response = state.recommendations.recommend(condition)?;
    Ok(Json(response))
}

/// Rule-by-rule breakdown of one crop's score
pub async fn explain_recommendation(
    State(state): State<AppState>,
    Path(crop_id): Path<u32>,
    Json(condition): Json<FarmCondition>,
) -> AppResult<Json<ScoreExplanation>> {
    let explanation = state.recommendations.explain(crop_id, &condition)?;
    Ok(Json(explanation))
}
