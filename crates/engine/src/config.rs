//! Environment-driven engine configuration.

use std::time::Duration;

/// Default location-store API endpoint for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// Configuration for the engine's outbound services.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the location-store REST API.
    pub api_url: String,
    /// Bearer token for the location-store API, if required.
    pub api_key: Option<String>,
    /// Base URL of the Nominatim-compatible reverse geocoder.
    pub geocode_url: String,
    /// Timeout applied to every outbound HTTP call.
    pub http_timeout: Duration,
}

impl EngineConfig {
    /// Load configuration from the environment, with development defaults.
    ///
    /// Reads `MISHWAR_API_URL`, `MISHWAR_API_KEY`, `MISHWAR_GEOCODE_URL`,
    /// and `MISHWAR_HTTP_TIMEOUT_SECS`. A `.env` file in the working
    /// directory is honored when present.
    pub fn from_env() -> Self {
        // Missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();

        let api_url =
            std::env::var("MISHWAR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("MISHWAR_API_KEY").ok();
        let geocode_url = std::env::var("MISHWAR_GEOCODE_URL").unwrap_or_else(|_| {
            crate::infrastructure::geocode::DEFAULT_NOMINATIM_BASE_URL.to_string()
        });
        let http_timeout = std::env::var("MISHWAR_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        Self {
            api_url,
            api_key,
            geocode_url,
            http_timeout,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            geocode_url: crate::infrastructure::geocode::DEFAULT_NOMINATIM_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}
