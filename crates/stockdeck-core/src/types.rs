//! # Domain Types
//!
//! Core domain types used throughout the Stockdeck dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │  InventoryItem   │   │      Role        │   │   StockLevel     │    │
//! │  │  ──────────────  │   │  ──────────────  │   │  ──────────────  │    │
//! │  │  id (server)     │   │  Admin           │   │  Critical  ≤ 3   │    │
//! │  │  product_name    │   │  Staff           │   │  VeryLow   ≤ 5   │    │
//! │  │  sku (business)  │   └──────────────────┘   │  Low       ≤ 10  │    │
//! │  │  price (string)  │                          │  Normal          │    │
//! │  └──────────────────┘                          └──────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `InventoryItem.id` is assigned by the server and immutable; `sku` is the
//! human-readable business identifier. All mutations address the `id`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Inventory Item
// =============================================================================

/// An inventory record as served by the backend.
///
/// ## Price As String
/// The backend stores price as a fixed-point decimal and serializes it as a
/// string (e.g. `"499.00"`). The dashboard parses it to a float only for
/// range comparisons; the string is passed back verbatim on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryItem {
    /// Unique identifier, assigned by the server. Immutable.
    pub id: i64,

    /// Display name shown on the item card.
    pub product_name: String,

    /// Stock Keeping Unit - business identifier, unique server-side.
    pub sku: String,

    /// Units currently in stock.
    pub quantity: u32,

    /// Price as a decimal string (see type-level docs).
    pub price: String,

    /// Product category (one of [`crate::CATEGORIES`] for seeded data,
    /// but the server does not enforce the set).
    pub category: String,

    /// Hosted image URL, if an image was ever uploaded for this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl InventoryItem {
    /// Parses the price string to a float for comparisons.
    ///
    /// Returns `None` when the string doesn't parse; such items are
    /// excluded by the price-range filter rather than treated as zero.
    pub fn price_value(&self) -> Option<f64> {
        self.price.trim().parse::<f64>().ok().filter(|p| p.is_finite())
    }

    /// Classifies the current stock level for the warning badge.
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.quantity)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Severity buckets for the low-stock warning badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// 3 units or fewer.
    Critical,
    /// 4-5 units.
    VeryLow,
    /// 6 units up to the low-stock threshold.
    Low,
    /// Above the threshold.
    Normal,
}

impl StockLevel {
    /// Buckets a quantity against [`LOW_STOCK_THRESHOLD`].
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0..=3 => StockLevel::Critical,
            4..=5 => StockLevel::VeryLow,
            q if q <= LOW_STOCK_THRESHOLD => StockLevel::Low,
            _ => StockLevel::Normal,
        }
    }

    /// Whether the badge should be shown at all.
    #[inline]
    pub fn is_warning(&self) -> bool {
        !matches!(self, StockLevel::Normal)
    }
}

// =============================================================================
// Role
// =============================================================================

/// Account role chosen at registration.
///
/// Admins may create, edit and delete items; staff accounts are read-only.
/// The wire format is lowercase (`"admin"` / `"staff"`), which is what the
/// registration endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::ValidationError;

    /// Accepts the wire names case-insensitively ("Admin" from the role
    /// picker lowercases to "admin").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            _ => Err(crate::ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["admin".to_string(), "staff".to_string()],
            }),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
