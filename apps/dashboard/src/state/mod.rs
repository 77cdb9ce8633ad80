//! # State Module
//!
//! Manages dashboard state behind thread-safe wrappers.
//!
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Can exercise individual states in isolation
//! 3. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────┬──────────────────┐                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐            │
//! │  │ SessionState │  │ InventoryState │  │   AlertSlot      │            │
//! │  │              │  │                │  │                  │            │
//! │  │  tokens      │  │  items         │  │  last outcome    │            │
//! │  │  role flags  │  │  filters       │  │  banner          │            │
//! │  │              │  │  fetch epoch   │  │                  │            │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Each state is protected by its own Mutex                            │
//! │  • Locks are released before any network await point                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod inventory;
mod session;

pub use inventory::{FetchTicket, InventoryState};
pub use session::{SessionContext, SessionState};
