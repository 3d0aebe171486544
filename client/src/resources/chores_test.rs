use reqwest::Method;
use serde_json::json;

use super::*;
use crate::net::test_helpers::{body, empty_list, fixture, json};
use crate::net::types::EndMode;
use crate::state::session::Session;

#[test]
fn entry_action_path_formats_expected_path() {
    assert_eq!(entry_action_path(12, "approve"), "/chore-entries/12/approve/");
    assert_eq!(entry_action_path(12, "reject"), "/chore-entries/12/reject/");
    assert_eq!(entry_path(3), "/chore-entries/3/");
    assert_eq!(chore_path(4), "/chores/4/");
}

#[tokio::test]
async fn list_chores_passes_assignee_filter() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    list_chores(&fx.client, Some(7)).await.unwrap();
    list_chores(&fx.client, None).await.unwrap();

    let calls = fx.transport.calls();
    assert_eq!(calls[0].query, vec![("assigned_to".to_owned(), "7".to_owned())]);
    assert!(calls[1].query.is_empty());
}

#[tokio::test]
async fn approve_and_reject_post_to_actions() {
    let fx = fixture(Session::new("A1", "R1"), |req| {
        let status = if req.url.contains("/approve/") { "approved" } else { "rejected" };
        json(200, json!({ "status": status }))
    });

    assert_eq!(approve_entry(&fx.client, 5).await.unwrap().status, "approved");
    assert_eq!(reject_entry(&fx.client, 6).await.unwrap().status, "rejected");

    let calls = fx.transport.calls();
    assert_eq!(calls[0].method, Method::POST);
    assert!(calls[0].url.ends_with("/chore-entries/5/approve/"));
    assert!(calls[1].url.ends_with("/chore-entries/6/reject/"));
}

#[tokio::test]
async fn complete_entry_patches_status() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(200, json!({ "id": 5, "chore": 1, "assigned_to": 2, "due_date": "2026-02-01", "status": "completed" }))
    });
    let entry = complete_entry(&fx.client, 5).await.unwrap();
    assert_eq!(entry.status, "completed");

    let call = &fx.transport.calls()[0];
    assert_eq!(call.method, Method::PATCH);
    assert_eq!(body(call), json!({ "status": "completed" }));
}

#[tokio::test]
async fn create_chore_sends_schedule_fields() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(201, json!({ "id": 10, "name": "Laundry", "schedule": "0 9 * * 6", "points": 4 }))
    });
    let chore = NewChore {
        name: "Laundry".into(),
        points: 4,
        assigned_to: Some(3),
        schedule: "0 9 * * 6".into(),
        start_date: "2026-01-03".into(),
        end_mode: EndMode::AfterOccurrences,
        end_date: None,
        end_after: Some(10),
    };
    let created = create_chore(&fx.client, &chore).await.unwrap();
    assert_eq!(created.id, 10);

    let sent = body(&fx.transport.calls()[0]);
    assert_eq!(sent["end_mode"], json!("after_occurrences"));
    assert_eq!(sent["end_after"], json!(10));
    assert_eq!(sent["assigned_to"], json!(3));
}

#[tokio::test]
async fn delete_chore_surfaces_backend_error() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(403, json!({ "detail": "Only parents can delete chores." })));
    let err = delete_chore(&fx.client, 4).await.unwrap_err();
    assert_eq!(err.detail().as_deref(), Some("Only parents can delete chores."));
}

#[tokio::test]
async fn exchange_points_rejects_zero_locally() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    let err = exchange_points(&fx.client, 1, 0).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
    assert!(fx.transport.calls().is_empty());
}

#[tokio::test]
async fn exchange_points_returns_transaction_id() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(201, json!({ "transaction": 77 })));
    let result = exchange_points(&fx.client, 2, 30).await.unwrap();
    assert_eq!(result.transaction, 77);

    let call = &fx.transport.calls()[0];
    assert!(call.url.ends_with("/chore-entries/exchange_points/"));
    assert_eq!(body(call), json!({ "account": 2, "points": 30 }));
}
