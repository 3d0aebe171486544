//! Chores, their scheduled entries, and the parent approval workflow.
//!
//! Schedule-to-entry expansion happens on the backend; the client only lists
//! entries and moves them through `completed` → `approved` / `rejected`.

#[cfg(test)]
#[path = "chores_test.rs"]
mod tests;

use serde_json::json;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{Chore, ChoreEntry, EntryStatus, Id, NewChore, PointsExchange};

const CHORES: &str = "/chores/";
const ENTRIES: &str = "/chore-entries/";

fn chore_path(id: Id) -> String {
    format!("{CHORES}{id}/")
}

fn entry_path(id: Id) -> String {
    format!("{ENTRIES}{id}/")
}

fn entry_action_path(id: Id, action: &str) -> String {
    format!("{ENTRIES}{id}/{action}/")
}

/// List chores, optionally only those assigned to one member.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_chores(client: &ApiClient, assigned_to: Option<Id>) -> Result<Vec<Chore>, ApiError> {
    let request = ApiRequest::get(CHORES).query_opt("assigned_to", assigned_to);
    client.request_json(&request).await
}

/// # Errors
///
/// Any error from the authenticated client; validation failures come back as
/// `ApiError::Status` with field messages in the body.
pub async fn create_chore(client: &ApiClient, chore: &NewChore) -> Result<Chore, ApiError> {
    let body = serde_json::to_value(chore).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.request_json(&ApiRequest::post(CHORES).json(body)).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn delete_chore(client: &ApiClient, id: Id) -> Result<(), ApiError> {
    client.request_empty(&ApiRequest::delete(chore_path(id))).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_entries(client: &ApiClient) -> Result<Vec<ChoreEntry>, ApiError> {
    client.request_json(&ApiRequest::get(ENTRIES)).await
}

/// Mark an entry done so a parent can review it.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn complete_entry(client: &ApiClient, id: Id) -> Result<ChoreEntry, ApiError> {
    let request = ApiRequest::patch(entry_path(id)).json(json!({ "status": "completed" }));
    client.request_json(&request).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn approve_entry(client: &ApiClient, id: Id) -> Result<EntryStatus, ApiError> {
    client.request_json(&ApiRequest::post(entry_action_path(id, "approve"))).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn reject_entry(client: &ApiClient, id: Id) -> Result<EntryStatus, ApiError> {
    client.request_json(&ApiRequest::post(entry_action_path(id, "reject"))).await
}

/// Convert earned points into a ledger transaction on `account`.
///
/// # Errors
///
/// `InvalidInput` for zero points; otherwise any error from the
/// authenticated client (the backend answers 400 when the balance is short).
pub async fn exchange_points(client: &ApiClient, account: Id, points: u32) -> Result<PointsExchange, ApiError> {
    if points == 0 {
        return Err(ApiError::InvalidInput("points must be positive"));
    }
    let request = ApiRequest::post(format!("{ENTRIES}exchange_points/"))
        .json(json!({ "account": account, "points": points }));
    client.request_json(&request).await
}
