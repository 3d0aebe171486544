use serde_json::json;

use super::*;
use crate::net::test_helpers::{empty_list, fixture, json};
use crate::state::session::Session;

#[tokio::test]
async fn list_assets_decodes_current_price() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(200, json!([{ "id": 2, "name": "Family Fund", "symbol": "FAM", "current_price": "10.25" }]))
    });
    let assets = list_assets(&fx.client).await.unwrap();
    assert_eq!(assets[0].current_price.as_deref(), Some("10.25"));
}

#[tokio::test]
async fn asset_without_price_decodes() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(200, json!([{ "id": 3, "symbol": "NEW" }])));
    let assets = list_assets(&fx.client).await.unwrap();
    assert_eq!(assets[0].current_price, None);
    assert!(assets[0].name.is_empty());
}

#[tokio::test]
async fn list_prices_scopes_to_asset() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    list_prices(&fx.client, 2).await.unwrap();
    let call = &fx.transport.calls()[0];
    assert!(call.url.ends_with("/asset-prices/"));
    assert_eq!(call.query, vec![("asset".to_owned(), "2".to_owned())]);
}
