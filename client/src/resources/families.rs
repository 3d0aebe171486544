//! Families, memberships, and invitations.

#[cfg(test)]
#[path = "families_test.rs"]
mod tests;

use serde_json::json;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{Family, Id, Invitation, Membership, NewInvitation};

const FAMILIES: &str = "/families/";
const MEMBERSHIPS: &str = "/family-memberships/";
const INVITATIONS: &str = "/family-invitations/";

fn family_path(id: Id) -> String {
    format!("{FAMILIES}{id}/")
}

fn require_name(name: &str) -> Result<&str, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("family name is required"));
    }
    Ok(name)
}

// =============================================================================
// FAMILIES
// =============================================================================

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_families(client: &ApiClient) -> Result<Vec<Family>, ApiError> {
    client.request_json(&ApiRequest::get(FAMILIES)).await
}

/// # Errors
///
/// `InvalidInput` for a blank name; otherwise any error from the
/// authenticated client.
pub async fn create_family(client: &ApiClient, name: &str) -> Result<Family, ApiError> {
    let name = require_name(name)?;
    client.request_json(&ApiRequest::post(FAMILIES).json(json!({ "name": name }))).await
}

/// # Errors
///
/// `InvalidInput` for a blank name; otherwise any error from the
/// authenticated client.
pub async fn rename_family(client: &ApiClient, id: Id, name: &str) -> Result<Family, ApiError> {
    let name = require_name(name)?;
    let request = ApiRequest::patch(family_path(id)).json(json!({ "name": name }));
    client.request_json(&request).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn delete_family(client: &ApiClient, id: Id) -> Result<(), ApiError> {
    client.request_empty(&ApiRequest::delete(family_path(id))).await
}

// =============================================================================
// MEMBERS & INVITATIONS
// =============================================================================

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_memberships(client: &ApiClient) -> Result<Vec<Membership>, ApiError> {
    client.request_json(&ApiRequest::get(MEMBERSHIPS)).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_invitations(client: &ApiClient) -> Result<Vec<Invitation>, ApiError> {
    client.request_json(&ApiRequest::get(INVITATIONS)).await
}

/// Invite someone by email. The backend generates the join code.
///
/// # Errors
///
/// `InvalidInput` when the email has no `@`; otherwise any error from the
/// authenticated client.
pub async fn create_invitation(client: &ApiClient, invitation: &NewInvitation) -> Result<Invitation, ApiError> {
    if !invitation.email.contains('@') {
        return Err(ApiError::InvalidInput("a valid email is required"));
    }
    let body = serde_json::to_value(invitation).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.request_json(&ApiRequest::post(INVITATIONS).json(body)).await
}
