//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8001/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the application shell sends the user once the session is gone.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend API root, without a trailing slash (e.g. `https://home.example/api`).
    pub api_url: String,
    pub timeouts: Timeouts,
    /// File holding the persisted access and refresh tokens.
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `FAMPLUS_API_URL`: default `http://localhost:8001/api`
    /// - `FAMPLUS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FAMPLUS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FAMPLUS_SESSION_FILE`: default `$HOME/.famplus/session.json`
    ///
    /// # Errors
    ///
    /// Returns an error if neither `FAMPLUS_SESSION_FILE` nor `HOME` is set,
    /// or if the API URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = normalize_api_url(lookup("FAMPLUS_API_URL").as_deref().unwrap_or(DEFAULT_API_URL))?;
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup("FAMPLUS_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("FAMPLUS_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let session_file = match lookup("FAMPLUS_SESSION_FILE") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_file(lookup("HOME"))?,
        };

        Ok(Self { api_url, timeouts, session_file })
    }
}

/// Trim trailing slashes and reject anything that is not http(s).
///
/// # Errors
///
/// Returns `ApiError::Config` for a non-http URL.
pub fn normalize_api_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ApiError::Config(format!("FAMPLUS_API_URL must be an http(s) URL, got '{raw}'")));
    }
    Ok(trimmed.to_owned())
}

/// Zero would time out every request immediately, so it counts as unset.
fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

fn default_session_file(home: Option<String>) -> Result<PathBuf, ApiError> {
    let home = home
        .filter(|h| !h.is_empty())
        .ok_or_else(|| ApiError::Config("set FAMPLUS_SESSION_FILE or HOME".into()))?;
    Ok(PathBuf::from(home).join(".famplus").join("session.json"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
