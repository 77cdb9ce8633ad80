//! # Image Upload Adapter
//!
//! Sends a locally selected file to the external asset host and returns the
//! hosted URL to embed in the item payload.
//!
//! ## Wire Contract
//! ```text
//! POST https://api.cloudinary.com/v1_1/<cloud>/image/upload
//!   multipart/form-data:
//!     file          = <image bytes>
//!     upload_preset = <unsigned preset name>
//! → 200 {"secure_url": "https://res.cloudinary.com/..."}
//! ```
//!
//! Upload failure aborts the whole create/edit submission; the caller keeps
//! the dialog open so the user can retry.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// The asset host as seen by the dashboard controller.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads the file and returns its public URL.
    async fn upload(&self, path: &Path) -> ApiResult<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// HTTP implementation of [`ImageHost`].
#[derive(Debug, Clone)]
pub struct ImageUploader {
    http: Client,
    config: ApiConfig,
}

impl ImageUploader {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ImageUploader { http, config })
    }
}

#[async_trait]
impl ImageHost for ImageUploader {
    async fn upload(&self, path: &Path) -> ApiResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Upload(format!("cannot read {}: {}", path.display(), e)))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        debug!(file = %file_name, bytes = bytes.len(), "uploading image");

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .http
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        parsed
            .secure_url
            .ok_or_else(|| ApiError::Upload("asset host returned no secure_url".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_shape() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"secure_url": "https://res.example/x.png", "bytes": 123}"#)
                .unwrap();
        assert_eq!(parsed.secure_url.as_deref(), Some("https://res.example/x.png"));

        let parsed: UploadResponse = serde_json::from_str(r#"{"public_id": "x"}"#).unwrap();
        assert!(parsed.secure_url.is_none());
    }
}
