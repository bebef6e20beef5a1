//! Smart Crop Advisor - Backend
//!
//! Crop recommendations for Indian farmers from soil, climate and resource
//! conditions, with weather, pest, market and chat support views.

use axum::{routing::get, Router};
use shared::Catalog;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
use error::AppResult;
use external::{ChatClient, PestDetectionClient, WeatherClient};
use services::{
    ChatService, MarketService, PestService, RecommendationService, ReportingService,
    WeatherService,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recommendations: RecommendationService,
    pub reporting: ReportingService,
    pub market: MarketService,
    pub weather: WeatherService,
    pub pest: PestService,
    pub chat: ChatService,
}

impl AppState {
    /// Load the catalog and wire up services and API clients
    pub fn from_config(config: Config) -> AppResult<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    error::AppError::Configuration(format!(
                        "Failed to read catalog {}: {}",
                        path, e
                    ))
                })?;
                Catalog::from_json(&json)?
            }
            None => Catalog::builtin()?,
        };
        tracing::info!("Loaded crop catalog with {} crops", catalog.len());

        let http = external::http_client(config.http_timeout_secs)?;

        let weather = api_key(&config.weather.api_key).map(|key| {
            WeatherClient::new(http.clone(), key, config.weather.api_endpoint.clone())
        });
        let pest = api_key(&config.pest.api_key).map(|key| {
            PestDetectionClient::new(http.clone(), config.pest.api_endpoint.clone(), key)
        });
        let chat = api_key(&config.chat.api_key).map(|key| {
            ChatClient::new(
                http.clone(),
                config.chat.api_endpoint.clone(),
                key,
                config.chat.model.clone(),
                config.chat.max_tokens,
                config.chat.temperature,
            )
        });

        for (name, configured) in [
            ("weather", weather.is_some()),
            ("pest detection", pest.is_some()),
            ("chat", chat.is_some()),
        ] {
            if !configured {
                tracing::warn!("No {} API key configured, serving local fallbacks", name);
            }
        }

        Ok(Self {
            recommendations: RecommendationService::new(catalog.clone(), config.scoring.clone()),
            reporting: ReportingService::new(),
            market: MarketService::new(catalog),
            weather: WeatherService::new(weather),
            pest: PestService::new(pest),
            chat: ChatService::new(chat),
            config: Arc::new(config),
        })
    }
}

/// Blank keys count as missing
fn api_key(key: &Option<String>) -> Option<String> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
