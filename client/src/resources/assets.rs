//! Asset portfolio and price history.

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;

use crate::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::transport::ApiRequest;
use crate::net::types::{Asset, AssetPrice, Id};

const ASSETS: &str = "/assets/";
const PRICES: &str = "/asset-prices/";

/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_assets(client: &ApiClient) -> Result<Vec<Asset>, ApiError> {
    client.request_json(&ApiRequest::get(ASSETS)).await
}

/// Price history for one asset.
///
/// # Errors
///
/// Any error from the authenticated client.
pub async fn list_prices(client: &ApiClient, asset: Id) -> Result<Vec<AssetPrice>, ApiError> {
    client.request_json(&ApiRequest::get(PRICES).query("asset", asset)).await
}
