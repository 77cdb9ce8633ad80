//! # Inventory State
//!
//! Holds the fetched item list, the active filters, and the load status.
//!
//! ## Stale Response Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Fetch Epoch                                          │
//! │                                                                         │
//! │  refresh #1: begin_fetch() ──► ticket(1) ──► request ──┐ (slow)         │
//! │  refresh #2: begin_fetch() ──► ticket(2) ──► request ──┼──► apply(2) ✓  │
//! │                                                        └──► apply(1) ✗  │
//! │                                                                         │
//! │  begin_fetch bumps the epoch and hands out a ticket. Only the ticket    │
//! │  matching the current epoch may write results back; anything older is   │
//! │  dropped. Logout bumps the epoch too, so in-flight responses from a     │
//! │  closed session never land.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read operations clone out what they need; no lock is ever held across
//! an await point.

use std::sync::Mutex;

use stockdeck_core::{visible, FilterState, InventoryItem, VisiblePage};

/// Proof that a fetch was started. Must be presented to write results back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
struct Inventory {
    items: Vec<InventoryItem>,
    filters: FilterState,
    epoch: u64,
    loading: bool,
    error: Option<String>,
}

/// Thread-safe holder for the inventory list and its filters.
#[derive(Debug, Default)]
pub struct InventoryState {
    inner: Mutex<Inventory>,
}

impl InventoryState {
    pub fn new() -> Self {
        InventoryState::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inventory> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // Fetch Lifecycle
    // =========================================================================

    /// Marks a fetch as in flight and returns the ticket for its results.
    pub fn begin_fetch(&self) -> FetchTicket {
        let mut inv = self.lock();
        inv.epoch += 1;
        inv.loading = true;
        inv.error = None;
        FetchTicket(inv.epoch)
    }

    /// Installs fetched items. Returns `false` when the ticket is stale,
    /// in which case nothing changes.
    ///
    /// A successful install also resets the price slider ceiling to track
    /// the new list.
    pub fn apply_items(&self, ticket: FetchTicket, items: Vec<InventoryItem>) -> bool {
        let mut inv = self.lock();
        if ticket.0 != inv.epoch {
            return false;
        }
        let inv = &mut *inv;
        inv.items = items;
        inv.filters.reset_price_range(&inv.items);
        inv.loading = false;
        inv.error = None;
        true
    }

    /// Records a fetch failure. Stale tickets are ignored and the previous
    /// list is kept either way.
    pub fn apply_error(&self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        let mut inv = self.lock();
        if ticket.0 != inv.epoch {
            return false;
        }
        inv.loading = false;
        inv.error = Some(message.into());
        true
    }

    /// Drops any in-flight fetch and clears the list and filters.
    ///
    /// Called on logout so responses from the closed session are rejected.
    pub fn reset(&self) {
        let mut inv = self.lock();
        inv.epoch += 1;
        inv.items.clear();
        inv.filters = FilterState::default();
        inv.loading = false;
        inv.error = None;
    }

    // =========================================================================
    // Filter Updates
    // =========================================================================

    /// Replaces the search text. The page is left alone; the engine clamps
    /// it when the result set shrinks.
    pub fn set_search(&self, search: impl Into<String>) {
        self.lock().filters.search = search.into();
    }

    /// Replaces the category restriction from the picker's selection.
    pub fn set_category(&self, selection: &str) {
        let mut inv = self.lock();
        inv.filters.category = stockdeck_core::CategoryFilter::from_selection(selection);
    }

    /// Replaces the inclusive price bounds.
    pub fn set_price_range(&self, min: f64, max: f64) {
        self.lock().filters.price_range = (min, max);
    }

    /// Jumps to a page. Out-of-range values are clamped at render time.
    pub fn set_page(&self, page: usize) {
        self.lock().filters.page = page;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Runs the filter engine over the current list and filters.
    pub fn visible_page(&self) -> VisiblePage {
        let inv = self.lock();
        visible(&inv.items, &inv.filters)
    }

    /// Looks up an item by id in the full (unfiltered) list.
    pub fn item_by_id(&self, id: i64) -> Option<InventoryItem> {
        let inv = self.lock();
        inv.items.iter().find(|i| i.id == id).cloned()
    }

    /// Number of items in the full list.
    pub fn item_count(&self) -> usize {
        self.lock().items.len()
    }

    /// Current fetch error banner, if any.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Copy of the current filters.
    pub fn filters(&self) -> FilterState {
        self.lock().filters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: &str) -> InventoryItem {
        InventoryItem {
            id,
            product_name: name.to_string(),
            sku: format!("SKU-{}", id),
            quantity: 5,
            price: price.to_string(),
            category: "Electronics".to_string(),
            image: None,
        }
    }

    #[test]
    fn apply_items_with_current_ticket_installs_list() {
        let state = InventoryState::new();
        let ticket = state.begin_fetch();
        assert!(state.is_loading());

        assert!(state.apply_items(ticket, vec![item(1, "Keyboard", "49.99")]));
        assert!(!state.is_loading());
        assert_eq!(state.item_count(), 1);
        assert!(state.error().is_none());
    }

    #[test]
    fn stale_ticket_is_dropped() {
        let state = InventoryState::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.apply_items(second, vec![item(2, "Mouse", "19.99")]));
        assert!(!state.apply_items(first, vec![item(1, "Keyboard", "49.99")]));

        assert_eq!(state.item_count(), 1);
        assert_eq!(state.item_by_id(2).unwrap().product_name, "Mouse");
    }

    #[test]
    fn stale_error_does_not_clobber_fresh_results() {
        let state = InventoryState::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(state.apply_items(second, vec![item(1, "Keyboard", "49.99")]));
        assert!(!state.apply_error(first, "Failed to load inventory items. Please try again later."));
        assert!(state.error().is_none());
    }

    #[test]
    fn fetch_error_keeps_previous_list() {
        let state = InventoryState::new();
        let ticket = state.begin_fetch();
        assert!(state.apply_items(ticket, vec![item(1, "Keyboard", "49.99")]));

        let retry = state.begin_fetch();
        assert!(state.apply_error(retry, "Failed to load inventory items. Please try again later."));
        assert_eq!(state.item_count(), 1);
        assert!(state.error().is_some());
    }

    #[test]
    fn successful_fetch_resets_price_ceiling() {
        let state = InventoryState::new();
        let ticket = state.begin_fetch();
        assert!(state.apply_items(ticket, vec![item(1, "Amp", "1250.00")]));
        assert_eq!(state.filters().price_range, (0.0, 1300.0));
    }

    #[test]
    fn reset_invalidates_in_flight_fetch() {
        let state = InventoryState::new();
        let ticket = state.begin_fetch();
        state.reset();

        assert!(!state.apply_items(ticket, vec![item(1, "Keyboard", "49.99")]));
        assert_eq!(state.item_count(), 0);
        assert_eq!(state.filters(), FilterState::default());
    }

    #[test]
    fn visible_page_applies_filters() {
        let state = InventoryState::new();
        let ticket = state.begin_fetch();
        assert!(state.apply_items(
            ticket,
            vec![item(1, "Keyboard", "49.99"), item(2, "Mouse", "19.99")],
        ));

        state.set_search("key");
        let page = state.visible_page();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.page_items[0].id, 1);
    }
}
