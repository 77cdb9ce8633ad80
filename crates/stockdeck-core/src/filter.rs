//! # Filter/Paginate Engine
//!
//! Pure functions that turn the full in-memory item list plus the current
//! filter state into the visible page.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     visible(items, filters)                             │
//! │                                                                         │
//! │  all items ──► category? ──► price in [min,max]? ──► name contains     │
//! │                                                      search? (ci)      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │            filtered set (total_count)                                  │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │   total_pages = max(1, ceil(count / ITEMS_PER_PAGE))                   │
//! │   page clamped to [1, total_pages]                                     │
//! │   slice [(page-1)*per_page .. page*per_page)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three predicates are conjunctive. Price bounds are inclusive; an item
//! whose price string doesn't parse fails the price predicate and is hidden.

use serde::{Deserialize, Serialize};

use crate::types::InventoryItem;
use crate::{DEFAULT_MAX_PRICE, ITEMS_PER_PAGE, PRICE_BUCKET};

// =============================================================================
// Category Filter
// =============================================================================

/// Category selection for the filter bar.
///
/// Modelled as a tagged variant instead of an `"All"` sentinel string so the
/// "no filter" case can't collide with a category literally named "All".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only items in the named category.
    Only(String),
}

impl CategoryFilter {
    /// Whether an item in `category` passes this filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Parses the filter-bar selection, where `"All"` means no restriction.
    pub fn from_selection(selection: &str) -> Self {
        if selection == "All" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(selection.to_string())
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// The complete filter/pagination state of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Category restriction.
    pub category: CategoryFilter,

    /// Inclusive price bounds `[min, max]`.
    pub price_range: (f64, f64),

    /// Case-insensitive substring matched against `product_name`.
    /// Empty means no search restriction.
    pub search: String,

    /// Current page, 1-based.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            category: CategoryFilter::All,
            price_range: (0.0, DEFAULT_MAX_PRICE),
            search: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Resets the price range to `[0, max_possible_price(items)]`.
    ///
    /// Called whenever the item list changes so the slider ceiling tracks
    /// the most expensive item.
    pub fn reset_price_range(&mut self, items: &[InventoryItem]) {
        self.price_range = (0.0, max_possible_price(items));
    }

    fn matches(&self, item: &InventoryItem) -> bool {
        if !self.category.matches(&item.category) {
            return false;
        }

        let (min, max) = self.price_range;
        match item.price_value() {
            Some(price) if price >= min && price <= max => {}
            _ => return false,
        }

        self.search.is_empty()
            || item
                .product_name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }
}

// =============================================================================
// Visible Page
// =============================================================================

/// Result of running the engine: the slice to render plus pagination facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisiblePage {
    /// Items on the current page, in list order. At most [`ITEMS_PER_PAGE`].
    pub page_items: Vec<InventoryItem>,

    /// Number of items in the filtered set (before pagination).
    pub total_count: usize,

    /// Always at least 1, so the pager renders even for an empty set.
    pub total_pages: usize,

    /// Page actually rendered after clamping to `[1, total_pages]`.
    pub page: usize,

    /// 1-based index of the first visible item ("Showing X-Y of N").
    /// Zero when the filtered set is empty.
    pub showing_from: usize,

    /// 1-based index of the last visible item. Zero when empty.
    pub showing_to: usize,
}

/// Computes the visible page for the current filters.
///
/// The requested page is clamped into `[1, total_pages]`: when a filter
/// change shrinks the result set, the user lands on the last real page
/// instead of a stranded empty one.
pub fn visible(items: &[InventoryItem], filters: &FilterState) -> VisiblePage {
    let filtered: Vec<&InventoryItem> = items.iter().filter(|i| filters.matches(i)).collect();

    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(ITEMS_PER_PAGE).max(1);
    let page = filters.page.clamp(1, total_pages);

    let start = (page - 1) * ITEMS_PER_PAGE;
    let end = (start + ITEMS_PER_PAGE).min(total_count);

    let page_items: Vec<InventoryItem> = if start < total_count {
        filtered[start..end].iter().map(|i| (*i).clone()).collect()
    } else {
        Vec::new()
    };

    let (showing_from, showing_to) = if page_items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    VisiblePage {
        page_items,
        total_count,
        total_pages,
        page,
        showing_from,
        showing_to,
    }
}

/// Price slider ceiling: the highest item price rounded up to the nearest
/// [`PRICE_BUCKET`], or [`DEFAULT_MAX_PRICE`] when no price is available.
pub fn max_possible_price(items: &[InventoryItem]) -> f64 {
    items
        .iter()
        .filter_map(|i| i.price_value())
        .fold(None::<f64>, |acc, p| Some(acc.map_or(p, |a| a.max(p))))
        .map(|highest| (highest / PRICE_BUCKET).ceil() * PRICE_BUCKET)
        .unwrap_or(DEFAULT_MAX_PRICE)
}

// =============================================================================
// Unit Tests
// =============================================================================
