//! In-app notifications.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod tests;

use serde_json::json;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{Id, MarkedRead, Notification};

const NOTIFICATIONS: &str = "/notifications/";
const MARK_READ: &str = "/notifications/mark_read/";

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_notifications(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.request_json(&ApiRequest::get(NOTIFICATIONS)).await
}

/// Mark the given notifications read. An empty set is a no-op and makes no
/// network call.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn mark_read(client: &ApiClient, ids: &[Id]) -> Result<MarkedRead, ApiError> {
    if ids.is_empty() {
        return Ok(MarkedRead { marked: 0 });
    }
    client.request_json(&ApiRequest::post(MARK_READ).json(json!({ "ids": ids }))).await
}
