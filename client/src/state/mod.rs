//! Client-side state: persisted session tokens and derived auth state.

pub mod auth;
pub mod session;
