//! # Validation Module
//!
//! Form input validation for the login/registration forms and the item
//! dialogs. A failed validation blocks submission before any network call.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client-side)                                    │
//! │  ├── Required fields, password length, confirmation match              │
//! │  └── Immediate field-level feedback, no network round trip             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Backend (Django REST)                                        │
//! │  ├── Uniqueness (SKU, username), role rules                            │
//! │  └── Surfaced via the ApiError message extraction                      │
//! │                                                                         │
//! │  Defense in depth: each layer catches different errors                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::dialog::ItemDraft;
use crate::error::{ValidationError, ValidationResult};
use crate::MIN_PASSWORD_LEN;

// =============================================================================
// Credential Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty (after trimming)
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    Ok(())
}

/// Validates a password.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least [`MIN_PASSWORD_LEN`] characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates the registration confirmation field against the password.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> ValidationResult<()> {
    if confirmation.is_empty() {
        return Err(ValidationError::Required {
            field: "confirm password".to_string(),
        });
    }

    if password != confirmation {
        return Err(ValidationError::Mismatch {
            field: "confirm password".to_string(),
        });
    }

    Ok(())
}

/// Validates a complete login form. First failing rule wins.
pub fn validate_login(username: &str, password: &str) -> ValidationResult<()> {
    validate_username(username)?;
    validate_password(password)?;
    Ok(())
}

/// Validates a complete registration form, including the role selection.
pub fn validate_registration(
    username: &str,
    password: &str,
    confirmation: &str,
    role: &str,
) -> ValidationResult<()> {
    validate_username(username)?;
    validate_password(password)?;
    validate_password_confirmation(password, confirmation)?;
    role.parse::<crate::Role>()?;
    Ok(())
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates an item draft before submission.
///
/// ## Rules
/// - `product_name` and `sku` are required
/// - `price` must parse as a non-negative number (the string itself is what
///   gets submitted; parsing only gates obvious garbage)
/// - `category` is required
pub fn validate_draft(draft: &ItemDraft) -> ValidationResult<()> {
    if draft.product_name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product name".to_string(),
        });
    }

    if draft.sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    match draft.price.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => {}
        _ => {
            return Err(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: "must be a non-negative number".to_string(),
            })
        }
    }

    if draft.category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
