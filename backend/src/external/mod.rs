//! External API integrations

pub mod chat;
pub mod pest;
pub mod weather;

pub use chat::ChatClient;
pub use pest::PestDetectionClient;
pub use weather::WeatherClient;

use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult};

/// HTTP client with the configured request timeout
pub fn http_client(timeout_secs: u64) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
