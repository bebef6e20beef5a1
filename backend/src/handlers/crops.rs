//! Crop catalog handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::Crop;

use crate::error::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CropSearchQuery {
    pub search: Option<String>,
}

/// List catalog crops, optionally filtered by name
pub async fn list_crops(
    State(state): State<AppState>,
    Query(query): Query<CropSearchQuery>,
) -> Json<Vec<Crop>> {
    let catalog = state.recommendations.catalog();
    let crops = catalog
        .search(query.search.as_deref().unwrap_or(""))
        .cloned()
        .collect();
    Json(crops)
}

/// Get one crop by id
pub async fn get_crop(
    State(state): State<AppState>,
    Path(crop_id): Path<u32>,
) -> AppResult<Json<Crop>> {
    state
        .recommendations
        .catalog()
        .get(crop_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Crop {}", crop_id)))
}
