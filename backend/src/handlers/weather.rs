//! HTTP handlers for weather endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::weather::WeatherReport;
use crate::AppState;

/// Query parameters for the outlook
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Get the 4-day outlook for a location
pub async fn get_weather_outlook(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherReport>> {
    let report = state
        .weather
        .outlook(query.latitude, query.longitude)
        .await?;
    Ok(Json(report))
}
