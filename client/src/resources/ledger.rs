//! Transaction ledger, categories, and accounts.

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;

use serde_json::json;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{Account, Category, Id, NewAccount, Transaction};

const TRANSACTIONS: &str = "/transactions/";
const CATEGORIES: &str = "/categories/";
const ACCOUNTS: &str = "/accounts/";

fn detail_path(collection: &str, id: Id) -> String {
    format!("{collection}{id}/")
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_transactions(client: &ApiClient, category: Option<Id>) -> Result<Vec<Transaction>, ApiError> {
    let request = ApiRequest::get(TRANSACTIONS).query_opt("category", category);
    client.request_json(&request).await
}

/// Assign a transaction to a category, or clear it with `None`.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn set_transaction_category(
    client: &ApiClient,
    id: Id,
    category: Option<Id>,
) -> Result<Transaction, ApiError> {
    let request = ApiRequest::patch(detail_path(TRANSACTIONS, id)).json(json!({ "category": category }));
    client.request_json(&request).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_categories(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    client.request_json(&ApiRequest::get(CATEGORIES)).await
}

/// List accounts, optionally only those owned by one member.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_accounts(client: &ApiClient, owner: Option<Id>) -> Result<Vec<Account>, ApiError> {
    let request = ApiRequest::get(ACCOUNTS).query_opt("owner", owner);
    client.request_json(&request).await
}

/// # Errors
///
/// `InvalidInput` for a blank name; otherwise any error from the
/// authenticated client.
pub async fn create_account(client: &ApiClient, account: &NewAccount) -> Result<Account, ApiError> {
    if account.name.trim().is_empty() {
        return Err(ApiError::InvalidInput("account name is required"));
    }
    let body = serde_json::to_value(account).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.request_json(&ApiRequest::post(ACCOUNTS).json(body)).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn delete_account(client: &ApiClient, id: Id) -> Result<(), ApiError> {
    client.request_empty(&ApiRequest::delete(detail_path(ACCOUNTS, id))).await
}
