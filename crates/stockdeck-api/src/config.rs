//! Dashboard client configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults, mirroring what the deployed dashboard reads from
//! its build environment.

use serde::{Deserialize, Serialize};
use std::env;

/// Remote endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, no trailing slash (e.g. "https://api.example.com")
    pub base_url: String,

    /// Asset-host account identifier (the `<cloud>` in the upload URL)
    pub asset_cloud_name: String,

    /// Unsigned upload preset registered with the asset host
    pub upload_preset: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ApiConfig {
            base_url: env::var("STOCKDECK_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string())
                .trim_end_matches('/')
                .to_string(),

            asset_cloud_name: env::var("STOCKDECK_ASSET_CLOUD_NAME")
                .unwrap_or_else(|_| "stockdeck-dev".to_string()),

            upload_preset: env::var("STOCKDECK_UPLOAD_PRESET")
                .unwrap_or_else(|_| "stockdeck-unsigned".to_string()),

            timeout_secs: env::var("STOCKDECK_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOCKDECK_HTTP_TIMEOUT_SECS".to_string()))?,
        })
    }

    /// Configuration pointing at an explicit backend; asset-host fields keep
    /// their development defaults. Used by tests and local tooling.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            asset_cloud_name: "stockdeck-dev".to_string(),
            upload_preset: "stockdeck-unsigned".to_string(),
            timeout_secs: 30,
        }
    }

    /// Full upload endpoint on the asset host.
    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.asset_cloud_name
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ApiConfig::with_base_url("http://localhost:8000/");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_upload_url_embeds_cloud_name() {
        let mut config = ApiConfig::with_base_url("http://localhost:8000");
        config.asset_cloud_name = "acme".to_string();
        assert_eq!(
            config.upload_url(),
            "https://api.cloudinary.com/v1_1/acme/image/upload"
        );
    }
}
