//! Route definitions for the Smart Crop Advisor

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/crops", crop_routes())
        .nest("/recommendations", recommendation_routes())
        .route("/market/prices", get(handlers::get_market_prices))
        .route("/weather", get(handlers::get_weather_outlook))
        .route("/pest/analyze", post(handlers::analyze_pest_image))
        .route("/chat", post(handlers::send_chat_message))
}

/// Crop catalog routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_crops))
        .route("/:crop_id", get(handlers::get_crop))
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_recommendations))
        .route("/explain/:crop_id", post(handlers::explain_recommendation))
        .route("/report", post(handlers::export_recommendation_report))
}
