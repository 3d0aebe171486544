use reqwest::Method;
use serde_json::json;

use super::*;
use crate::net::test_helpers::{body, empty_list, fixture, json};
use crate::net::types::Role;
use crate::state::session::Session;

#[tokio::test]
async fn create_family_trims_name() {
    let fx = fixture(Session::new("A1", "R1"), |_| json(201, json!({ "id": 1, "name": "Smiths" })));
    let family = create_family(&fx.client, "  Smiths ").await.unwrap();
    assert_eq!(family.name, "Smiths");
    assert!(family.settings_json.is_empty());
    assert_eq!(body(&fx.transport.calls()[0]), json!({ "name": "Smiths" }));
}

#[tokio::test]
async fn blank_family_name_never_reaches_backend() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    assert!(matches!(create_family(&fx.client, " ").await.unwrap_err(), ApiError::InvalidInput(_)));
    assert!(matches!(rename_family(&fx.client, 1, "").await.unwrap_err(), ApiError::InvalidInput(_)));
    assert!(fx.transport.calls().is_empty());
}

#[tokio::test]
async fn rename_family_patches_detail_path() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(200, json!({ "id": 3, "name": "Joneses", "settings_json": { "currency": "EUR" } }))
    });
    let family = rename_family(&fx.client, 3, "Joneses").await.unwrap();
    assert_eq!(family.settings_json["currency"], json!("EUR"));

    let call = &fx.transport.calls()[0];
    assert_eq!(call.method, Method::PATCH);
    assert!(call.url.ends_with("/families/3/"));
}

#[tokio::test]
async fn delete_family_uses_delete() {
    let fx = fixture(Session::new("A1", "R1"), |_| Ok(crate::net::transport::HttpResponse::new(204, "")));
    delete_family(&fx.client, 3).await.unwrap();
    assert_eq!(fx.transport.calls()[0].method, Method::DELETE);
}

#[tokio::test]
async fn list_memberships_decodes_roles() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(200, json!([
            { "id": 1, "user": 10, "family": 3, "role": "parent" },
            { "id": 2, "user": 11, "family": 3, "role": "child" }
        ]))
    });
    let members = list_memberships(&fx.client).await.unwrap();
    assert_eq!(members[0].role, Role::Parent);
    assert_eq!(members[1].role, Role::Child);
    assert!(fx.transport.calls()[0].url.ends_with("/family-memberships/"));
}

#[tokio::test]
async fn create_invitation_posts_payload() {
    let fx = fixture(Session::new("A1", "R1"), |_| {
        json(201, json!({
            "id": 9, "email": "kid@example.com", "family": 3, "role": "child",
            "code": "ab12cd", "accepted": false, "created": "2026-03-01T08:00:00Z"
        }))
    });
    let invite = NewInvitation { email: "kid@example.com".into(), family: 3, role: Role::Child };
    let created = create_invitation(&fx.client, &invite).await.unwrap();
    assert_eq!(created.code, "ab12cd");
    assert!(!created.accepted);

    let call = &fx.transport.calls()[0];
    assert!(call.url.ends_with("/family-invitations/"));
    assert_eq!(body(call), json!({ "email": "kid@example.com", "family": 3, "role": "child" }));
}

#[tokio::test]
async fn create_invitation_rejects_bad_email() {
    let fx = fixture(Session::new("A1", "R1"), empty_list);
    let invite = NewInvitation { email: "nobody".into(), family: 3, role: Role::Guest };
    assert!(matches!(create_invitation(&fx.client, &invite).await.unwrap_err(), ApiError::InvalidInput(_)));
    assert!(fx.transport.calls().is_empty());
}
