//! # Backend REST Client
//!
//! Thin client over the inventory backend. Authenticated endpoints carry
//! `Authorization: Bearer <access>`.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST   /api/token/      {username, password}      → {access, refresh}  │
//! │  POST   /api/register/   {username, password, role} → 2xx               │
//! │  GET    /api/user-role/                            → {is_admin, ...}    │
//! │  GET    /api/items/                                → [InventoryItem]    │
//! │  POST   /api/items/      CreateItemPayload         → InventoryItem      │
//! │  PUT    /api/items/{id}/ UpdateItemPayload         → InventoryItem      │
//! │  DELETE /api/items/{id}/                           → 2xx, no body       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Registration does not issue tokens; [`ApiGateway::register`] is followed
//! by a separate [`ApiGateway::login`] call (the register-then-login
//! sequence the dashboard performs).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockdeck_core::{InventoryItem, ItemDraft, Role};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::session::TokenPair;

// =============================================================================
// Wire Types
// =============================================================================

/// Response of `GET /api/user-role/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// Superuser - may create/edit/delete items.
    pub is_admin: bool,
    /// Any registered account; read access to the inventory.
    pub is_staff: bool,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    password: &'a str,
    role: Role,
}

/// Body of `POST /api/items/`.
///
/// `image_url` is always present: the hosted URL when a file was uploaded,
/// the empty string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItemPayload {
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: String,
    pub category: String,
    pub image_url: String,
}

impl CreateItemPayload {
    /// Builds the payload from a draft plus the upload result, if any.
    pub fn from_draft(draft: &ItemDraft, uploaded_url: Option<String>) -> Self {
        CreateItemPayload {
            product_name: draft.product_name.clone(),
            sku: draft.sku.clone(),
            quantity: draft.quantity,
            price: draft.price.clone(),
            category: draft.category.clone(),
            image_url: uploaded_url.unwrap_or_default(),
        }
    }
}

/// Body of `PUT /api/items/{id}/`.
///
/// `image` is sent only when a new file was uploaded in this edit session;
/// omitting the field tells the server to keep the stored image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemPayload {
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl UpdateItemPayload {
    /// Builds the payload from the edit draft plus the upload result, if any.
    pub fn from_draft(draft: &ItemDraft, uploaded_url: Option<String>) -> Self {
        UpdateItemPayload {
            product_name: draft.product_name.clone(),
            sku: draft.sku.clone(),
            quantity: draft.quantity,
            price: draft.price.clone(),
            category: draft.category.clone(),
            image: uploaded_url,
        }
    }
}

// =============================================================================
// Gateway Trait
// =============================================================================

/// The backend as seen by the dashboard controller.
///
/// [`ApiClient`] is the production implementation; tests use in-memory
/// fakes to exercise the controller flows without a network.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair>;
    async fn register(&self, username: &str, password: &str, role: Role) -> ApiResult<()>;
    async fn user_role(&self, access: &str) -> ApiResult<RoleInfo>;
    async fn list_items(&self, access: &str) -> ApiResult<Vec<InventoryItem>>;
    async fn create_item(
        &self,
        access: &str,
        payload: &CreateItemPayload,
    ) -> ApiResult<InventoryItem>;
    async fn update_item(
        &self,
        access: &str,
        id: i64,
        payload: &UpdateItemPayload,
    ) -> ApiResult<InventoryItem>;
    async fn delete_item(&self, access: &str, id: i64) -> ApiResult<()>;
}

// =============================================================================
// Api Client
// =============================================================================

/// HTTP implementation of [`ApiGateway`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Builds a client with the configured per-request timeout.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ApiClient { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Maps a non-2xx response to the extracted server message; passes 2xx
    /// responses through.
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ApiGateway for ApiClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        debug!(username, "POST /api/token/");
        let response = self
            .http
            .post(self.url("/api/token/"))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn register(&self, username: &str, password: &str, role: Role) -> ApiResult<()> {
        debug!(username, role = role.as_str(), "POST /api/register/");
        let response = self
            .http
            .post(self.url("/api/register/"))
            .json(&RegisterBody {
                username,
                password,
                role,
            })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn user_role(&self, access: &str) -> ApiResult<RoleInfo> {
        debug!("GET /api/user-role/");
        let response = self
            .http
            .get(self.url("/api/user-role/"))
            .bearer_auth(access)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn list_items(&self, access: &str) -> ApiResult<Vec<InventoryItem>> {
        debug!("GET /api/items/");
        let response = self
            .http
            .get(self.url("/api/items/"))
            .bearer_auth(access)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn create_item(
        &self,
        access: &str,
        payload: &CreateItemPayload,
    ) -> ApiResult<InventoryItem> {
        debug!(sku = %payload.sku, "POST /api/items/");
        let response = self
            .http
            .post(self.url("/api/items/"))
            .bearer_auth(access)
            .json(payload)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn update_item(
        &self,
        access: &str,
        id: i64,
        payload: &UpdateItemPayload,
    ) -> ApiResult<InventoryItem> {
        debug!(id, "PUT /api/items/{{id}}/");
        let response = self
            .http
            .put(self.url(&format!("/api/items/{}/", id)))
            .bearer_auth(access)
            .json(payload)
            .send()
            .await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn delete_item(&self, access: &str, id: i64) -> ApiResult<()> {
        debug!(id, "DELETE /api/items/{{id}}/");
        let response = self
            .http
            .delete(self.url(&format!("/api/items/{}/", id)))
            .bearer_auth(access)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ItemDraft {
        ItemDraft {
            product_name: "Blue Widget".to_string(),
            sku: "WID-001".to_string(),
            quantity: 4,
            price: "19.99".to_string(),
            category: "Electronics".to_string(),
            ..ItemDraft::default()
        }
    }

    #[test]
    fn test_create_payload_without_file_has_empty_image_url() {
        let payload = CreateItemPayload::from_draft(&draft(), None);
        assert_eq!(payload.image_url, "");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["image_url"], "");
    }

    #[test]
    fn test_create_payload_with_file_carries_hosted_url() {
        let payload = CreateItemPayload::from_draft(
            &draft(),
            Some("https://img.example/widget.png".to_string()),
        );
        assert_eq!(payload.image_url, "https://img.example/widget.png");
    }

    #[test]
    fn test_update_payload_omits_image_without_new_upload() {
        let payload = UpdateItemPayload::from_draft(&draft(), None);
        assert_eq!(payload.image, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["product_name"], "Blue Widget");
        assert_eq!(json["price"], "19.99");
    }

    #[test]
    fn test_update_payload_sends_image_after_upload() {
        let payload = UpdateItemPayload::from_draft(
            &draft(),
            Some("https://img.example/new.png".to_string()),
        );
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["image"], "https://img.example/new.png");
    }

    #[test]
    fn test_register_body_role_is_lowercase() {
        let body = RegisterBody {
            username: "alice",
            password: "secret",
            role: Role::Admin,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["role"], "admin");
    }
}
