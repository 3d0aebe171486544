//! The family's virtual exchange.
//!
//! Order matching runs on the backend. The client places and cancels orders
//! and reads back the book and the resulting trades.

#[cfg(test)]
#[path = "exchange_test.rs"]
mod tests;

use serde_json::json;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{ExchangeOrder, ExchangeTrade, Id, NewOrder};

const ORDERS: &str = "/exchange-orders/";
const TRADES: &str = "/exchange-trades/";

fn order_path(id: Id) -> String {
    format!("{ORDERS}{id}/")
}

/// The caller's orders for one asset.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_orders(client: &ApiClient, asset: Id) -> Result<Vec<ExchangeOrder>, ApiError> {
    client.request_json(&ApiRequest::get(ORDERS).query("asset", asset)).await
}

/// All open orders for one asset, from every member.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn order_book(client: &ApiClient, asset: Id) -> Result<Vec<ExchangeOrder>, ApiError> {
    let request = ApiRequest::get(ORDERS).query("asset", asset).query("book", 1);
    client.request_json(&request).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_trades(client: &ApiClient, asset: Id) -> Result<Vec<ExchangeTrade>, ApiError> {
    client.request_json(&ApiRequest::get(TRADES).query("asset", asset)).await
}

/// # Errors
///
/// `InvalidInput` for a blank quantity or price; otherwise any error from
/// the authenticated client.
pub async fn place_order(client: &ApiClient, order: &NewOrder) -> Result<ExchangeOrder, ApiError> {
    if order.quantity.trim().is_empty() || order.price.trim().is_empty() {
        return Err(ApiError::InvalidInput("quantity and price are required"));
    }
    let body = serde_json::to_value(order).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.request_json(&ApiRequest::post(ORDERS).json(body)).await
}

/// # Errors
///
/// Any error from the authenticated client.
pub async fn cancel_order(client: &ApiClient, id: Id) -> Result<ExchangeOrder, ApiError> {
    let request = ApiRequest::patch(order_path(id)).json(json!({ "status": "cancelled" }));
    client.request_json(&request).await
}
