//! # Session State
//!
//! Holds the authenticated session for the lifetime of the dashboard.
//!
//! The context is populated after the auth gate verifies the stored
//! tokens against the backend, and cleared on logout or when any
//! request comes back unauthorized.

use std::sync::Mutex;

use stockdeck_api::TokenPair;

/// An authenticated session with resolved role flags.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Tokens accepted by the backend
    pub tokens: TokenPair,

    /// Whether the account may create, edit, and delete items
    pub is_admin: bool,

    /// Whether the account has read-only staff access
    pub is_staff: bool,
}

/// Thread-safe holder for the current session, if any.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Mutex<Option<SessionContext>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Installs a verified session.
    pub fn set(&self, context: SessionContext) {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(context);
    }

    /// Drops the session. Safe to call when none is active.
    pub fn clear(&self) {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    /// Returns the access token of the active session.
    pub fn access_token(&self) -> Option<String> {
        let slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|c| c.tokens.access.clone())
    }

    /// Whether a verified session is active.
    pub fn is_active(&self) -> bool {
        let slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        slot.is_some()
    }

    /// Whether the active session has admin rights.
    pub fn is_admin(&self) -> bool {
        let slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|c| c.is_admin).unwrap_or(false)
    }
}
