//! # stockdeck-api: Remote Boundary for Stockdeck
//!
//! Everything that leaves the process lives here: the REST client for the
//! inventory backend, the session token store, and the image upload adapter
//! for the external asset host.
//!
//! ## Modules
//!
//! - [`client`] - Backend REST client and the [`ApiGateway`] trait
//! - [`upload`] - Asset-host upload adapter and the [`ImageHost`] trait
//! - [`session`] - Durable access/refresh token storage
//! - [`config`] - Environment-based configuration
//! - [`error`] - [`ApiError`] and server error-message extraction

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod upload;

pub use client::{ApiClient, ApiGateway, CreateItemPayload, RoleInfo, UpdateItemPayload};
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use session::{SessionError, SessionStore, TokenPair};
pub use upload::{ImageHost, ImageUploader};
