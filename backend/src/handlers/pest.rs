//! Pest and disease detection handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::pest::{PestAnalysisRequest, PestDiagnosis};
use crate::AppState;

/// Analyze an uploaded crop image
pub async fn analyze_pest_image(
    State(state): State<AppState>,
    Json(request): Json<PestAnalysisRequest>,
) -> AppResult<Json<PestDiagnosis>> {
    let diagnosis = state.pest.analyze(request).await?;
    Ok(Json(diagnosis))
}
