//! # stockdeck-core: Pure Dashboard Logic for Stockdeck
//!
//! This crate is the heart of the Stockdeck inventory dashboard. It contains
//! all client-side rules as pure functions and types with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockdeck Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     View Layer (external)                       │   │
//! │  │    Login Form ──► Item Grid ──► Filter Bar ──► Dialogs          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  Dashboard Controller (apps/)                   │   │
//! │  │    auth gate, fetch, create/edit/delete flows, logout           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockdeck-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │  filter   │  │  dialog   │  │ validation│   │   │
//! │  │   │   Item    │  │  visible  │  │  Drafts   │  │   rules   │   │   │
//! │  │   │   Draft   │  │  pages    │  │  Previews │  │   checks  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockdeck-api (HTTP boundary)                   │   │
//! │  │        REST client, session store, image upload adapter         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, ItemDraft, Role, etc.)
//! - [`filter`] - The filter/paginate engine (pure functions over item lists)
//! - [`dialog`] - Dialog state machine and image selection lifecycle
//! - [`validation`] - Form field validation rules
//! - [`error`] - Validation error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dialog;
pub mod error;
pub mod filter;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dialog::{DialogState, ImageSelection, ItemDraft, PreviewHandle, PreviewProbe};
pub use error::{ValidationError, ValidationResult};
pub use filter::{max_possible_price, visible, CategoryFilter, FilterState, VisiblePage};
pub use types::{InventoryItem, Role, StockLevel};
pub use validation::{
    validate_draft, validate_login, validate_password, validate_password_confirmation,
    validate_registration, validate_username,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of items shown per dashboard page. Fixed, not user-configurable.
pub const ITEMS_PER_PAGE: usize = 10;

/// Upper bound of the price slider when the item list is empty or no price
/// parses. Matches the slider's initial `[0, 1000]` range.
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// The price ceiling is rounded up to the nearest multiple of this bucket.
pub const PRICE_BUCKET: f64 = 100.0;

/// Minimum password length accepted by the registration/login forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Quantity at or below which an item counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Canonical product categories offered by the filter and the item forms.
pub const CATEGORIES: &[&str] = &["Electronics", "Clothing", "Home", "Sports", "Toys"];

/// Category pre-selected in a fresh item draft.
pub const DEFAULT_CATEGORY: &str = "Electronics";
