//! Configuration management for the Smart Crop Advisor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Crop catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Score jitter settings
    pub scoring: ScoringConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Pest identification API configuration
    pub pest: PestConfig,

    /// Chat assistant configuration
    pub chat: ChatConfig,

    /// Timeout applied to every outbound HTTP call, in seconds
    pub http_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file replacing the built-in catalog
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    /// Add the tie-breaking jitter to scores
    pub jitter_enabled: bool,

    /// Fixed seed for reproducible jitter
    pub jitter_seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key. Without it the fallback outlook is served.
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PestConfig {
    /// Plant disease identification endpoint
    pub api_endpoint: String,

    /// API key sent in the Api-Key header
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// OpenAI-compatible chat completions endpoint
    pub api_endpoint: String,

    /// Bearer token
    pub api_key: Option<String>,

    /// Model name
    pub model: String,

    /// Maximum tokens in a reply
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("CROP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(config::Config::builder())?
            .set_default("environment", environment.clone())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROP_ prefix)
            .add_source(
                Environment::with_prefix("CROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration built from defaults only. Used by tests.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults(config::Config::builder())?
            .set_default("environment", "test")?
            .build()?
            .try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("scoring.jitter_enabled", true)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("pest.api_endpoint", "https://crop.kindwise.com/api/v1/identification")?
            .set_default(
                "chat.api_endpoint",
                "https://api.groq.com/openai/v1/chat/completions",
            )?
            .set_default("chat.model", "llama-3.1-70b-versatile")?
            .set_default("chat.max_tokens", 500)?
            .set_default("chat.temperature", 0.7)?
            .set_default("http_timeout_secs", 15)
    }
}
