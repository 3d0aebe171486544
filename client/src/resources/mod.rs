//! Typed wrappers for each backend resource.
//!
//! Every call goes through [`ApiClient`](crate::net::http::ApiClient), so the
//! bearer header and the refresh-and-retry cycle apply uniformly. Member roles
//! live in [`Role`](crate::net::types::Role).

pub mod assets;
pub mod chores;
pub mod exchange;
pub mod families;
pub mod ledger;
pub mod notifications;
