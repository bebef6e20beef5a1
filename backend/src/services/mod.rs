//! Business logic services for the Smart Crop Advisor

pub mod chat;
pub mod market;
pub mod pest;
pub mod recommendation;
pub mod reporting;
pub mod weather;

pub use chat::ChatService;
pub use market::MarketService;
pub use pest::PestService;
pub use recommendation::RecommendationService;
pub use reporting::ReportingService;
pub use weather::WeatherService;

use serde::{Deserialize, Serialize};

/// Where a response came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Returned by the third-party API
    Live,
    /// Generated locally because the API is unconfigured or failed
    Fallback,
}
