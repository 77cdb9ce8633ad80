//! # App Error Type
//!
//! Unified error type for controller operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockdeck                              │
//! │                                                                         │
//! │  Controller Operation                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Validation Error? ─── ValidationError::Required ──┐                    │
//! │         │                                          │                    │
//! │         ▼                                          ▼                    │
//! │  HTTP Error? ───────── ApiError::Server ───────► AppError ──► caller    │
//! │         │                                          ▲                    │
//! │         ▼                                          │                    │
//! │  Session Error? ────── SessionError::Io ───────────┘                    │
//! │                                                                         │
//! │  Validation failures carry the offending field name so the view can     │
//! │  render the message inline next to the input. Everything else is        │
//! │  surfaced through the alert slot or the inventory error banner.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockdeck_api::{ApiError, SessionError};
use stockdeck_core::ValidationError;

/// Error returned from controller operations.
///
/// ## Serialization
/// This is what a UI layer receives when an operation fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "password must be at least 6 characters"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for controller responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// No valid session, or the backend rejected the credentials
    Unauthorized,

    /// Could not reach the backend
    Network,

    /// The backend reported a failure
    Server,

    /// Image upload failed
    UploadError,

    /// Session persistence failed
    SessionStorage,

    /// Operation called in a state that does not allow it
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: i64) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts form validation errors to app errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Converts HTTP client errors to app errors.
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { message } => AppError::unauthorized(message),
            ApiError::Transport(e) => {
                tracing::error!("Request transport failed: {}", e);
                AppError::new(ErrorCode::Network, "Could not reach the server")
            }
            ApiError::Server { status, message } => {
                tracing::error!(status, "Server rejected request: {}", message);
                AppError::new(ErrorCode::Server, message)
            }
            ApiError::Decode(e) => {
                tracing::error!("Response decode failed: {}", e);
                AppError::new(ErrorCode::Server, "Unexpected response from server")
            }
            ApiError::Upload(message) => AppError::new(ErrorCode::UploadError, message),
        }
    }
}

/// Converts session persistence errors to app errors.
impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session storage failed: {}", err);
        AppError::new(ErrorCode::SessionStorage, "Could not access the saved session")
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
