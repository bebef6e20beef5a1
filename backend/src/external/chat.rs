//! Chat completions client
//!
//! Talks to any OpenAI-compatible chat completions endpoint (Groq by default).

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Chat completions client
#[derive(Clone)]
pub struct ChatClient {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ChatClient {
    pub fn new(
        http_client: Client,
        api_endpoint: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            http_client,
            api_endpoint,
            api_key,
            model,
            max_tokens,
            temperature,
        }
    }

    /// Send the conversation and return the first choice's content
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> AppResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&self.api_endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ChatServiceError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ChatServiceError(format!(
                "API Error: {} - {}",
                status, detail
            )));
        }

        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ChatServiceError(format!("Failed to parse response: {}", e)))?;

        first_choice_content(data)
    }
}

fn first_choice_content(data: ChatCompletionResponse) -> AppResult<String> {
    data.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| AppError::ChatServiceError("Response contained no choices".to_string()))
}
