//! # Alert Slot
//!
//! One-shot notification slot for operation outcomes.
//!
//! Holds at most one alert at a time. A new alert replaces whatever was
//! there, and a view layer consumes the alert with [`AlertSlot::take`]
//! when it renders (and dismisses) the banner.

use std::sync::Mutex;

use serde::Serialize;

/// How an alert should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Success,
    Error,
}

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Alert {
            severity: AlertSeverity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            severity: AlertSeverity::Error,
            message: message.into(),
        }
    }
}

/// Thread-safe slot holding the most recent alert.
#[derive(Debug, Default)]
pub struct AlertSlot {
    current: Mutex<Option<Alert>>,
}

impl AlertSlot {
    pub fn new() -> Self {
        AlertSlot::default()
    }

    /// Replaces the current alert with a success message.
    pub fn success(&self, message: impl Into<String>) {
        self.set(Alert::success(message));
    }

    /// Replaces the current alert with an error message.
    pub fn error(&self, message: impl Into<String>) {
        self.set(Alert::error(message));
    }

    fn set(&self, alert: Alert) {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(alert);
    }

    /// Returns a copy of the current alert without consuming it.
    pub fn peek(&self) -> Option<Alert> {
        let slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    /// Removes and returns the current alert.
    pub fn take(&self) -> Option<Alert> {
        let mut slot = self.current.lock().unwrap_or_else(|e| e.into_inner());
        slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_alert_replaces_previous() {
        let slot = AlertSlot::new();
        slot.success("Item added successfully!");
        slot.error("Failed to delete item. Please try again.");

        let alert = slot.take().unwrap();
        assert_eq!(alert.severity, AlertSeverity::Error);
        assert_eq!(alert.message, "Failed to delete item. Please try again.");
    }

    #[test]
    fn take_consumes_the_alert() {
        let slot = AlertSlot::new();
        slot.success("Login successful!");
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn peek_does_not_consume() {
        let slot = AlertSlot::new();
        slot.success("Registration successful! Redirecting to dashboard...");
        assert!(slot.peek().is_some());
        assert!(slot.peek().is_some());
    }
}
