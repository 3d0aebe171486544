//! Login and logout against the token endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Login failures keep the existing session untouched and hand the backend's
//! error back; `login_error_message` turns it into the text a login form
//! shows.

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

use serde::Deserialize;
use tracing::info;

use super::http::{ApiClient, TOKEN_PATH};
use super::transport::ApiRequest;
use crate::error::ApiError;
use crate::state::auth::AuthState;
use crate::state::session::{Session, SessionEvent, TokenStore};

const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
}

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns the message a login form should show when a field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Message to show for a failed login: the backend `detail`, or a generic one.
#[must_use]
pub fn login_error_message(err: &ApiError) -> String {
    match err {
        ApiError::InvalidInput(message) => (*message).to_owned(),
        ApiError::Transport(message) => message.clone(),
        _ => err.detail().unwrap_or_else(|| LOGIN_FAILED.to_owned()),
    }
}

/// Obtain a token pair via `POST /token/` and persist it.
///
/// # Errors
///
/// `InvalidInput` for blank fields, `Unauthorized` for rejected credentials,
/// or any transport, status, decode, or storage error.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
    let (email, password) = validate_login_input(email, password).map_err(ApiError::InvalidInput)?;
    let request = ApiRequest::post(TOKEN_PATH).json(serde_json::json!({ "email": email, "password": password }));
    let response = client.send(&request).await?.error_for_status()?;
    let tokens: LoginResponse = response.json()?;

    client.store().save(&Session::new(tokens.access, tokens.refresh))?;
    info!("logged in");
    client.emit(SessionEvent::LoggedIn);
    Ok(())
}

/// Drop both tokens. Purely local; the backend keeps no session to end.
///
/// # Errors
///
/// Returns an error if the token store cannot be written.
pub fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.store().clear()?;
    info!("logged out");
    client.emit(SessionEvent::LoggedOut);
    Ok(())
}

/// Whether an access token is currently stored.
///
/// # Errors
///
/// Returns an error if the token store cannot be read.
pub fn is_authenticated(client: &ApiClient) -> Result<bool, ApiError> {
    Ok(client.session()?.access_token.is_some())
}

/// Auth state for route guards, derived from the stored session.
///
/// # Errors
///
/// Returns an error if the token store cannot be read.
pub fn auth_state(client: &ApiClient) -> Result<AuthState, ApiError> {
    Ok(AuthState::from_session(&client.session()?))
}
