//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards in the application shell to decide whether to send
//! the user to the login entry point before rendering a protected view.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use super::session::Session;

/// Authentication state as seen by the shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// Derive the state from a restored session. Only the access token
    /// counts; a lone refresh token still needs a round trip to be useful.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self { authenticated: session.access_token.is_some(), loading: false }
    }
}

/// Whether a protected view should redirect to login.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.authenticated
}
