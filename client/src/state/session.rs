//! Persisted session tokens and the events emitted when they change.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is two strings kept in client-local storage under fixed key
//! names (`token`, `refreshToken`). It is read on start to restore a login,
//! rewritten on every refresh, and removed on logout or when a refresh fails.
//!
//! DESIGN
//! ======
//! Storage sits behind `TokenStore` so the HTTP client never touches a
//! concrete medium. `FileTokenStore` backs the CLI; `MemoryTokenStore` backs
//! tests and short-lived embeddings.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::StoreError;

pub const ACCESS_TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

// =============================================================================
// SESSION
// =============================================================================

/// Access/refresh token pair. Either half may be missing.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access_token: Some(access.into()), refresh_token: Some(refresh.into()) }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// Tokens stay out of debug output and therefore out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Session lifecycle notifications broadcast to the application shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    /// The access token was renewed; `rotated` is true when the backend also
    /// issued a new refresh token.
    Refreshed { rotated: bool },
    LoggedOut,
    /// The session could not be recovered and has been cleared. The shell
    /// should send the user to `redirect_to`.
    Invalidated { redirect_to: String },
}

// =============================================================================
// STORES
// =============================================================================

/// Client-local storage for the session tokens.
pub trait TokenStore: Send + Sync {
    /// Read the current session. A store that was never written yields an
    /// empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read or parsed.
    fn load(&self) -> Result<Session, StoreError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove both tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn clear(&self) -> Result<(), StoreError> {
        self.save(&Session::default())
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Session>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { inner: Mutex::new(session) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Session, StoreError> {
        Ok(self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = session.clone();
        Ok(())
    }
}

/// JSON file store: `{"token": "...", "refreshToken": "..."}`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Session, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Session::default()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        if session.is_empty() {
            return self.clear();
        }
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        // Owner-only temp file in the same directory, renamed over the target.
        let text = serde_json::to_string_pretty(session)?;
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(text.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
