//! Networking for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the network seam, `http` is the authenticated client with
//! the refresh protocol, `api` holds login/logout, and `types` defines the
//! backend records.

pub mod api;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
