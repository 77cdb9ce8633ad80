//! # Error Types
//!
//! Validation error types for stockdeck-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockdeck-core errors (this file)                                     │
//! │  └── ValidationError  - Form input failures, blocked pre-network       │
//! │                                                                         │
//! │  stockdeck-api errors (separate crate)                                 │
//! │  └── ApiError         - Transport, status and server-reported errors   │
//! │                                                                         │
//! │  Dashboard app errors                                                  │
//! │  └── AppError         - What the view layer sees (code + message)      │
//! │                                                                         │
//! │  Flow: ValidationError → AppError   /   ApiError → AppError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing field message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements. A failed
/// validation blocks submission before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Two fields that must agree do not (password confirmation).
    #[error("{field} does not match")]
    Mismatch { field: String },

    /// Invalid format (e.g., a price that doesn't parse as a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");

        let err = ValidationError::Mismatch {
            field: "confirm password".to_string(),
        };
        assert_eq!(err.to_string(), "confirm password does not match");
    }
}
