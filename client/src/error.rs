//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures surface to the caller untouched and are never retried.
//! A 401 is the only status the client acts on (see `net::http`); every other
//! non-success status is handed back as `Status` so the caller can show the
//! backend's `detail` text.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use serde_json::Value;

/// Errors produced by session storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session file io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced by the authenticated client and the resource calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A configuration value was missing or malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend rejected the credentials and the session could not be
    /// recovered for this request.
    #[error("not authenticated")]
    Unauthorized { body: String },

    /// Token refresh failed; the stored session has been torn down.
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// Any other non-success status, passed through unchanged.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// A success response did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Caller-supplied input was rejected before any request was made.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Reading or writing the persisted session failed.
    #[error("session storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Stable machine-readable code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_CONFIG",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::SessionExpired(_) => "E_SESSION_EXPIRED",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    /// Whether the caller may reasonably try the same call again.
    ///
    /// The client itself never retries on these; this is advice for the UI.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }

    /// True when the session is gone and the user has to log in again.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. } | Self::SessionExpired(_))
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message from the backend's error body.
    ///
    /// The backend reports failures as `{"detail": "..."}`; field validation
    /// errors arrive as `{"field": ["msg", ...]}` and are flattened.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Unauthorized { body } | Self::Status { body, .. } => detail_from_body(body),
            _ => None,
        }
    }
}

pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;
    if let Some(detail) = map.get("detail").and_then(Value::as_str) {
        return Some(detail.to_owned());
    }

    let mut parts = Vec::new();
    for (field, messages) in map {
        match messages {
            Value::String(message) => parts.push(format!("{field}: {message}")),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                if !joined.is_empty() {
                    parts.push(format!("{field}: {joined}"));
                }
            }
            _ => {}
        }
    }
    if parts.is_empty() { None } else { Some(parts.join("; ")) }
}
