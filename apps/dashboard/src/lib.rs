//! # Stockdeck Dashboard
//!
//! View-agnostic controller for the inventory dashboard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Dashboard App                                        │
//! │                                                                         │
//! │  Any View Layer ───► Dashboard controller ───► stockdeck-api ───► HTTP │
//! │                              │                                          │
//! │                              └───► stockdeck-core (pure engine)         │
//! │                                                                         │
//! │  The controller owns all mutable state (session, inventory, dialogs,   │
//! │  alerts). A view renders snapshots of that state and calls the         │
//! │  controller's methods; it never talks to the backend itself.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod alert;
pub mod controller;
pub mod error;
pub mod state;

pub use alert::{Alert, AlertSeverity, AlertSlot};
pub use controller::{AuthOutcome, Dashboard};
pub use error::{AppError, ErrorCode};
pub use state::{FetchTicket, InventoryState, SessionContext, SessionState};
