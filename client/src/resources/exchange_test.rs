use reqwest::Method;
use serde_json::json;

use super::*;
use crate::net::test_helpers::{body, empty_list, fixture, json};
use crate::net::types::OrderSide;
use crate::state::session::Session;

fn open_order() -> serde_json::Value {
    json!({
        "id": 4, "asset": 2, "side": "buy", "quantity": "3", "price": "9.50",
        "remaining": "3", "status": "open", "created_at": "2026-02-02T10:00:00Z"
    })
}

#[tokio::test]
async fn list_orders_scopes_to_asset() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    list_orders(&fx.client, 2).await.unwrap();
    assert_eq!(fx.transport.calls()[0].query, vec![("asset".to_owned(), "2".to_owned())]);
}

#[tokio::test]
async fn order_book_requests_book_flag() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(200, json!([open_order()])));
    let book = order_book(&fx.client, 2).await.unwrap();
    assert_eq!(book[0].side, OrderSide::Buy);
    assert_eq!(
        fx.transport.calls()[0].query,
        vec![("asset".to_owned(), "2".to_owned()), ("book".to_owned(), "1".to_owned())]
    );
}

#[tokio::test]
async fn place_order_posts_payload() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(201, open_order()));
    let order = NewOrder { asset: 2, side: OrderSide::Buy, quantity: "3".into(), price: "9.50".into() };
    let placed = place_order(&fx.client, &order).await.unwrap();
    assert_eq!(placed.id, 4);
    assert_eq!(
        body(&fx.transport.calls()[0]),
        json!({ "asset": 2, "side": "buy", "quantity": "3", "price": "9.50" })
    );
}

#[tokio::test]
async fn place_order_requires_quantity_and_price() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    let order = NewOrder { asset: 2, side: OrderSide::Sell, quantity: String::new(), price: "1".into() };
    assert!(matches!(place_order(&fx.client, &order).await.unwrap_err(), ApiError::InvalidInput(_)));
    assert!(fx.transport.calls().is_empty());
}

#[tokio::test]
async fn place_order_surfaces_field_errors() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(400, json!({ "price": ["Ensure this value is greater than 0."] }))
    });
    let order = NewOrder { asset: 2, side: OrderSide::Sell, quantity: "1".into(), price: "0".into() };
    let err = place_order(&fx.client, &order).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.detail().is_some_and(|d| d.contains("greater than 0")));
}

#[tokio::test]
async fn cancel_order_patches_status() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        let mut order = open_order();
        order["status"] = json!("cancelled");
        json(200, order)
    });
    let cancelled = cancel_order(&fx.client, 4).await.unwrap();
    assert_eq!(cancelled.status, "cancelled");

    let call = &fx.transport.calls()[0];
    assert_eq!(call.method, Method::PATCH);
    assert!(call.url.ends_with("/exchange-orders/4/"));
    assert_eq!(body(call), json!({ "status": "cancelled" }));
}

#[tokio::test]
async fn list_trades_decodes() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(200, json!([{ "id": 1, "asset": 2, "price": "9.50", "quantity": "1", "timestamp": "2026-02-02T10:01:00Z" }]))
    });
    let trades = list_trades(&fx.client, 2).await.unwrap();
    assert_eq!(trades.len(), 1);
    assert!(fx.transport.calls()[0].url.ends_with("/exchange-trades/"));
}
