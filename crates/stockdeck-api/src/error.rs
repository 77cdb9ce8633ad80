//! # API Error Types
//!
//! Errors surfaced by the remote boundary, plus extraction of the
//! human-readable message from backend error responses.
//!
//! ## Server Error Shapes
//! The backend (Django REST Framework) reports errors in two shapes:
//! ```json
//! {"detail": "No active account found with the given credentials"}
//! {"username": ["A user with that username already exists."]}
//! ```
//! [`extract_server_message`] takes `detail` when present, otherwise the
//! first message of the first field entry; anything unrecognized falls back
//! to a generic string at the call site.

use thiserror::Error;

/// Convenience alias for results at the remote boundary.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Api Error
// =============================================================================

/// Errors from the backend REST API or the asset host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never completed (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401/403 - the bearer token is missing, expired, or insufficient.
    /// The auth gate treats this as "session over".
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Any other non-2xx status, with the extracted server message.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body didn't match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Asset host accepted the request but returned no usable URL.
    #[error("image upload failed: {0}")]
    Upload(String),
}

impl ApiError {
    /// Whether this failure should tear down the session. Auth failures
    /// force a logout and a redirect to login.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Builds the status-class error for a non-2xx response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_server_message(body)
            .unwrap_or_else(|| "An error occurred".to_string());
        if status == 401 || status == 403 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server { status, message }
        }
    }
}

// =============================================================================
// Server Message Extraction
// =============================================================================

/// Pulls the first human-readable message out of a backend error body.
///
/// Recognizes `{"detail": "..."}` and DRF field-error maps
/// (`{"field": ["msg", ...]}`). Returns `None` for unrecognized shapes.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    if let Some(detail) = map.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_string());
    }

    let first = map.values().next()?;
    match first {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(messages) => messages
            .first()
            .and_then(|m| m.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_detail_field() {
        let body = r#"{"detail": "No active account found with the given credentials"}"#;
        assert_eq!(
            extract_server_message(body).unwrap(),
            "No active account found with the given credentials"
        );
    }

    #[test]
    fn test_extracts_first_field_error() {
        let body = r#"{"username": ["A user with that username already exists."]}"#;
        assert_eq!(
            extract_server_message(body).unwrap(),
            "A user with that username already exists."
        );
    }

    #[test]
    fn test_unrecognized_shape_returns_none() {
        assert_eq!(extract_server_message("not json"), None);
        assert_eq!(extract_server_message(r#"{"count": 3}"#), None);
        assert_eq!(extract_server_message(r#"[1, 2, 3]"#), None);
    }

    #[test]
    fn test_from_status_classifies_auth() {
        let err = ApiError::from_status(401, r#"{"detail": "Token expired"}"#);
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "unauthorized: Token expired");

        let err = ApiError::from_status(500, "");
        assert!(!err.is_auth());
        assert_eq!(err.to_string(), "server error (500): An error occurred");
    }
}
