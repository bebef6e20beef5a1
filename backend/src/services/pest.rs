//! Pest and disease detection service
//!
//! Sends a crop photo to the identification API and turns the suggestions
//! into a single diagnosis with a recommended action. If the API is not
//! configured or the call fails, a diagnosis is drawn from a short list of
//! common diseases so the farmer still gets actionable advice.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::external::pest::{IdentifyRequest, IdentifyResponse};
use crate::external::PestDetectionClient;
use crate::services::DataSource;

/// Pest detection service
#[derive(Clone)]
pub struct PestService {
    client: Option<PestDetectionClient>,
}

/// Image submitted for analysis
#[derive(Debug, Deserialize)]
pub struct PestAnalysisRequest {
    /// Raw base64 or a data URL ("data:image/jpeg;base64,...")
    pub image_base64: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Diagnosis returned to the farmer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PestDiagnosis {
    pub disease: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub source: DataSource,
}

const COMMON_DISEASES: [(&str, &str); 5] = [
    (
        "Leaf Blight",
        "Apply copper-based fungicide. Remove affected leaves and ensure proper spacing for air circulation.",
    ),
    (
        "Powdery Mildew",
        "Use sulfur-based treatment. Improve air circulation and avoid overhead watering.",
    ),
    (
        "Aphid Infestation",
        "Spray neem oil solution. Introduce natural predators like ladybugs.",
    ),
    (
        "Bacterial Spot",
        "Remove infected plants. Use copper-based bactericide and practice crop rotation.",
    ),
    (
        "Rust Disease",
        "Apply fungicide containing chlorothalonil. Remove infected leaves immediately.",
    ),
];

impl PestService {
    pub fn new(client: Option<PestDetectionClient>) -> Self {
        Self { client }
    }

    /// Analyze a crop image
    pub async fn analyze(&self, request: PestAnalysisRequest) -> AppResult<PestDiagnosis> {
        let image = normalize_image(&request.image_base64)?;

        let Some(client) = &self.client else {
            tracing::debug!("No pest API key configured, using fallback diagnosis");
            return Ok(fallback_diagnosis(&mut rand::thread_rng()));
        };

        let identify = IdentifyRequest {
            images: vec![image],
            latitude: request.latitude,
            longitude: request.longitude,
        };

        match client.identify(&identify).await {
            Ok(response) => {
                let diagnosis = diagnosis_from_response(response);
                tracing::info!(
                    disease = %diagnosis.disease,
                    confidence = ?diagnosis.confidence,
                    "Pest analysis complete"
                );
                Ok(diagnosis)
            }
            Err(e) => {
                tracing::warn!("Pest detection failed, using fallback: {}", e);
                Ok(fallback_diagnosis(&mut rand::thread_rng()))
            }
        }
    }
}

/// Strip any data URL prefix and check the payload decodes as base64
pub fn normalize_image(input: &str) -> AppResult<String> {
    let trimmed = input.trim();
    let payload = match trimmed.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => trimmed,
    };

    let invalid = |message: &str, message_hi: &str| AppError::Validation {
        field: "image_base64".to_string(),
        message: message.to_string(),
        message_hi: message_hi.to_string(),
    };

    if payload.is_empty() {
        return Err(invalid("Image is required", "छवि आवश्यक है"));
    }

    match STANDARD.decode(payload) {
        Ok(bytes) if !bytes.is_empty() => Ok(payload.to_string()),
        _ => Err(invalid(
            "Image must be valid base64",
            "छवि मान्य base64 में होनी चाहिए",
        )),
    }
}

/// Map identification suggestions to a single diagnosis
pub fn diagnosis_from_response(response: IdentifyResponse) -> PestDiagnosis {
    if response.suggestions.is_empty() {
        return PestDiagnosis {
            disease: "Analysis complete".to_string(),
            action: "No specific disease detected.".to_string(),
            confidence: None,
            source: DataSource::Live,
        };
    }

    let with_details = response
        .suggestions
        .into_iter()
        .find_map(|s| {
            let probability = s.probability;
            s.disease_details.map(|d| (d, probability))
        });

    match with_details {
        Some((details, probability)) => PestDiagnosis {
            disease: details
                .name
                .unwrap_or_else(|| "Unknown Disease".to_string()),
            action: details
                .treatment
                .unwrap_or_else(|| "No treatment information available.".to_string()),
            confidence: probability,
            source: DataSource::Live,
        },
        None => PestDiagnosis {
            disease: "No disease detected".to_string(),
            action: "No action required.".to_string(),
            confidence: None,
            source: DataSource::Live,
        },
    }
}

/// Random entry from the common disease list
pub fn fallback_diagnosis<R: Rng + ?Sized>(rng: &mut R) -> PestDiagnosis {
    let (disease, action) = COMMON_DISEASES
        .choose(rng)
        .copied()
        .unwrap_or(COMMON_DISEASES[0]);

    PestDiagnosis {
        disease: disease.to_string(),
        action: action.to_string(),
        confidence: None,
        source: DataSource::Fallback,
    }
}
