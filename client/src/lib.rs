//! Client library for the family finance and chores backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend issues a short-lived access token and a longer-lived refresh
//! token. This crate persists both, attaches the access token to every call,
//! and transparently refreshes it once when the backend answers 401. When
//! the refresh itself fails the session is torn down and subscribers receive
//! [`SessionEvent::Invalidated`] pointing at the login route.
//!
//! LAYOUT
//! ======
//! - `config`: environment-driven settings
//! - `net`: transport seam, authenticated client, login/logout, record types
//! - `resources`: one module of typed calls per backend resource
//! - `state`: persisted session tokens and derived auth state

pub mod config;
pub mod error;
pub mod net;
pub mod resources;
pub mod state;

pub use config::ClientConfig;
pub use error::{ApiError, StoreError};
pub use net::http::ApiClient;
pub use net::types::Role;
pub use state::session::{FileTokenStore, MemoryTokenStore, Session, SessionEvent, TokenStore};
