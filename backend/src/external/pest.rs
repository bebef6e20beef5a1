//! Plant disease identification client
//!
//! Client for a crop.health style identification API: an image goes up as
//! base64, a list of suggestions comes back.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Client for the plant disease identification service
#[derive(Clone)]
pub struct PestDetectionClient {
    api_endpoint: String,
    api_key: String,
    http_client: Client,
}

/// Request to identify diseases in an image
#[derive(Debug, Serialize)]
pub struct IdentifyRequest {
    /// Base64 encoded images
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Response from the identification API
#[derive(Debug, Deserialize, Default)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

/// One candidate identification
#[derive(Debug, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub disease_details: Option<DiseaseDetails>,
}

#[derive(Debug, Deserialize)]
pub struct DiseaseDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
}

impl PestDetectionClient {
    /// Create a new pest detection client
    pub fn new(http_client: Client, api_endpoint: String, api_key: String) -> Self {
        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Send an image for identification
    pub async fn identify(&self, request: &IdentifyRequest) -> AppResult<IdentifyResponse> {
        let response = self
            .http_client
            .post(&self.api_endpoint)
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::PestDetectionError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PestDetectionError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: IdentifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::PestDetectionError(format!("Failed to parse response: {}", e)))?;

        Ok(result)
    }
}
