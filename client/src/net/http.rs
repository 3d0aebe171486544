//! Authenticated HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through `ApiClient::send`. It attaches the stored
//! access token as a bearer header (never on `/token/` endpoints) and, when
//! the backend answers 401, runs one refresh-and-retry cycle before giving up.
//!
//! PER-REQUEST FLOW
//! ================
//! ```text
//! Sent ──2xx/4xx/5xx──▶ Done (status passed through)
//!   │
//!   └─401, Attempt::Initial──▶ Refreshing ──ok──▶ Retrying ──▶ Done | Failed
//!                                  │
//!                                  └─fail──▶ Failed + session torn down
//! ```
//! A 401 on `Attempt::Retried` is returned as-is; there is never a second
//! refresh for the same logical request.
//!
//! SINGLE-FLIGHT REFRESH
//! =====================
//! Refreshes are serialized on `refresh_lock`. A handler that gets the lock
//! after another one already rotated the access token skips the network call
//! and retries with the stored token. If the session was already torn down by
//! a failed refresh, late handlers fail without emitting another
//! `Invalidated` event.

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

use super::transport::{ApiRequest, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::config::{ClientConfig, LOGIN_PATH};
use crate::error::ApiError;
use crate::state::session::{FileTokenStore, Session, SessionEvent, TokenStore};

pub const TOKEN_PATH: &str = "/token/";
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";
pub const UNAUTHORIZED: u16 = 401;

const EVENT_CAPACITY: usize = 16;

/// Whether a path targets token issuance or refresh. Such requests never
/// carry a bearer header and never trigger a refresh.
#[must_use]
pub fn is_token_endpoint(path: &str) -> bool {
    path.contains(TOKEN_PATH)
}

/// One-shot retry guard carried through a single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Initial,
    Retried,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct TokenPair {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ApiClient {
    base_url: String,
    login_path: String,
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    refresh_lock: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            login_path: LOGIN_PATH.to_owned(),
            transport,
            store,
            refresh_lock: Mutex::new(()),
            events,
        }
    }

    /// Build a client with the `reqwest` transport and the file token store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config.timeouts)?;
        let store = FileTokenStore::new(config.session_file.clone());
        Ok(Self::new(config.api_url.clone(), Arc::new(transport), Arc::new(store)))
    }

    /// Override where `Invalidated` events tell the shell to go.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subscribe to session lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Current persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn session(&self) -> Result<Session, ApiError> {
        Ok(self.store.load()?)
    }

    pub(crate) fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    // -------------------------------------------------------------------------
    // send
    // -------------------------------------------------------------------------

    /// Send a request with bearer auth and one-shot refresh on 401.
    ///
    /// Non-401 responses, including 4xx/5xx, come back as `Ok` unchanged.
    ///
    /// # Errors
    ///
    /// - `Transport` when no response was obtained.
    /// - `Unauthorized` when the backend still rejects the request after the
    ///   one permitted refresh, when no refresh token is held, or when a token
    ///   endpoint itself answers 401.
    /// - `SessionExpired` when the refresh call fails; the session is cleared.
    pub async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, ApiError> {
        let mut attempt = Attempt::Initial;
        loop {
            let bearer = self.bearer_for(&request.path)?;
            let response = self.issue(request, bearer.as_deref()).await?;
            if response.status != UNAUTHORIZED {
                return Ok(response);
            }

            if is_token_endpoint(&request.path) {
                return Err(ApiError::Unauthorized { body: response.body });
            }
            if attempt == Attempt::Retried {
                warn!(method = %request.method, path = %request.path, "request rejected after token refresh");
                return Err(ApiError::Unauthorized { body: response.body });
            }

            attempt = Attempt::Retried;
            debug!(method = %request.method, path = %request.path, "401 received; refreshing session");
            self.recover(bearer.as_deref(), response).await?;
        }
    }

    /// Send and decode a JSON body, mapping non-2xx to `ApiError::Status`.
    ///
    /// # Errors
    ///
    /// Any error from [`ApiClient::send`], a non-success status, or a body
    /// that does not decode as `T`.
    pub async fn request_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.error_for_status()?.json()
    }

    /// Send and discard the body, mapping non-2xx to `ApiError::Status`.
    ///
    /// # Errors
    ///
    /// Any error from [`ApiClient::send`] or a non-success status.
    pub async fn request_empty(&self, request: &ApiRequest) -> Result<(), ApiError> {
        self.send(request).await?.error_for_status()?;
        Ok(())
    }

    fn bearer_for(&self, path: &str) -> Result<Option<String>, ApiError> {
        if is_token_endpoint(path) {
            return Ok(None);
        }
        Ok(self.store.load()?.access_token)
    }

    async fn issue(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<HttpResponse, ApiError> {
        let mut wire = HttpRequest::resolve(&self.base_url, request);
        if let Some(token) = bearer {
            wire = wire.with_bearer(token);
        }
        let response = self.transport.send(wire).await?;
        debug!(method = %request.method, path = %request.path, status = response.status, "response");
        Ok(response)
    }

    // -------------------------------------------------------------------------
    // refresh
    // -------------------------------------------------------------------------

    /// Explicitly renew the access token with the stored refresh token.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when no refresh token is held, `SessionExpired` when the
    /// refresh call fails (the session is cleared).
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        let session = self.store.load()?;
        let Some(refresh_token) = session.refresh_token else {
            return Err(ApiError::Unauthorized { body: String::new() });
        };
        self.refresh_locked(&refresh_token).await
    }

    /// Bring the session back after `rejected` drew a 401.
    async fn recover(&self, rejected: Option<&str>, original: HttpResponse) -> Result<(), ApiError> {
        let _guard = self.refresh_lock.lock().await;
        let session = self.store.load()?;

        if let Some(current) = session.access_token.as_deref() {
            if Some(current) != rejected {
                debug!("access token already rotated by a concurrent refresh");
                return Ok(());
            }
        }

        let Some(refresh_token) = session.refresh_token else {
            if session.access_token.is_some() {
                self.invalidate("no refresh token held");
            }
            return Err(ApiError::Unauthorized { body: original.body });
        };

        self.refresh_locked(&refresh_token).await
    }

    /// Caller must hold `refresh_lock`.
    async fn refresh_locked(&self, refresh_token: &str) -> Result<(), ApiError> {
        let pair = match self.exchange_refresh_token(refresh_token).await {
            Ok(pair) => pair,
            Err(err) => {
                self.invalidate(&err.to_string());
                return Err(ApiError::SessionExpired(err.to_string()));
            }
        };

        let rotated = pair.refresh.is_some();
        let session = Session {
            access_token: Some(pair.access),
            refresh_token: Some(pair.refresh.unwrap_or_else(|| refresh_token.to_owned())),
        };
        self.store.save(&session)?;
        info!(rotated, "session refreshed");
        self.emit(SessionEvent::Refreshed { rotated });
        Ok(())
    }

    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let body = serde_json::to_value(RefreshRequest { refresh: refresh_token })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = ApiRequest::post(TOKEN_REFRESH_PATH).json(body);
        let response = self.issue(&request, None).await?.error_for_status()?;
        response.json::<TokenPair>()
    }

    /// Clear both tokens and tell the shell to go to the login path. A
    /// failed clear is logged; the caller still reports the auth failure.
    fn invalidate(&self, reason: &str) {
        warn!(%reason, "session invalidated");
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear session tokens");
        }
        self.emit(SessionEvent::Invalidated { redirect_to: self.login_path.clone() });
    }
}
