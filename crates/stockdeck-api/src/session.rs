//! # Session Store
//!
//! Durable access/refresh token storage with an explicit lifecycle:
//! load-on-start, save-on-login, clear-on-logout.
//!
//! ## Storage Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  login/register ──► save(TokenPair) ──► session.json in the platform   │
//! │                                          data dir                       │
//! │  app start ───────► load() ───────────► Some(tokens) | None            │
//! │  logout / auth ───► clear() ──────────► file removed                   │
//! │  failure                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The on-disk keys are `accessToken` / `refreshToken`, the dashboard's
//! fixed storage-key contract. Nothing else is persisted client-side.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Access/refresh token pair as issued by `POST /api/token/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// On-disk session shape. Field names are the fixed storage keys.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "accessToken")]
    access_token: String,

    #[serde(rename = "refreshToken")]
    refresh_token: String,

    /// When the pair was saved. Informational only - expiry is the
    /// backend's call, surfaced as a 401.
    saved_at: DateTime<Utc>,
}

/// Session persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("no platform data directory available")]
    NoDataDir,
}

/// File-backed store for the token pair.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the platform-default location
    /// (e.g. `~/.local/share/stockdeck/session.json` on Linux).
    pub fn open_default() -> Result<Self, SessionError> {
        let dirs = ProjectDirs::from("io", "stockdeck", "stockdeck")
            .ok_or(SessionError::NoDataDir)?;
        Ok(Self::at_path(dirs.data_dir().join("session.json")))
    }

    /// Store at an explicit path. Used by tests and tooling.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored token pair, `None` if no session has been saved.
    ///
    /// A corrupt file is an error; the auth gate responds by clearing the
    /// session and redirecting to login.
    pub fn load(&self) -> Result<Option<TokenPair>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = serde_json::from_str(&raw)?;
        Ok(Some(TokenPair {
            access: stored.access_token,
            refresh: stored.refresh_token,
        }))
    }

    /// Persists a freshly issued token pair, replacing any prior session.
    pub fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredSession {
            access_token: tokens.access.clone(),
            refresh_token: tokens.refresh.clone(),
            saved_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Removes the stored session. Idempotent - clearing an absent session
    /// is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
