//! Integration tests for public sharing and the anonymous share link.

mod helpers;

use helpers::id_of;
use http::StatusCode;
use serde_json::json;

async fn set_public(app: &helpers::TestApp, id: &str, is_public: bool) -> helpers::TestResponse {
    app.authed(
        "PUT",
        &format!("/api/snippets/{id}/sharing"),
        Some(json!({ "is_public": is_public })),
    )
    .await
}

#[tokio::test]
async fn test_share_and_read_anonymously() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("shared", "print('hi')").await);

    let response = set_public(&app, &id, true).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["is_public"], true);
    let share_id = data["share_id"].as_str().unwrap().to_string();
    assert_eq!(share_id.len(), 12);
    assert!(share_id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_eq!(
        data["share_url"].as_str().unwrap(),
        format!("http://127.0.0.1:8080/s/{share_id}")
    );

    let public = app
        .request("GET", &format!("/api/s/{share_id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["name"], "shared");
    assert_eq!(public.body["code"], "print('hi')");
    assert!(public.body.get("account_id").is_none());
    assert!(public.body.get("id").is_none());
}

#[tokio::test]
async fn test_private_and_unknown_share_ids_look_the_same() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("secret", "x").await);

    let response = set_public(&app, &id, true).await;
    let share_id = response.body["data"]["share_id"].as_str().unwrap().to_string();
    set_public(&app, &id, false).await;

    let private = app
        .request("GET", &format!("/api/s/{share_id}"), None, None)
        .await;
    let unknown = app.request("GET", "/api/s/zzzzzzzzzzzz", None, None).await;

    assert_eq!(private.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(private.body, unknown.body);
}

#[tokio::test]
async fn test_share_id_is_reused() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("stable", "x").await);

    let first = set_public(&app, &id, true).await.body["data"]["share_id"].clone();
    let private = set_public(&app, &id, false).await;
    assert_eq!(private.body["data"]["share_id"], first);
    assert!(private.body["data"]["share_url"].is_null());

    let again = set_public(&app, &id, true).await;
    assert_eq!(again.body["data"]["share_id"], first);
}

#[tokio::test]
async fn test_sharing_records_no_version() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("quiet", "x").await);
    set_public(&app, &id, true).await;
    set_public(&app, &id, false).await;

    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    assert!(versions.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleted_snippet_share_link_is_gone() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("temp", "x").await);
    let share_id = set_public(&app, &id, true).await.body["data"]["share_id"]
        .as_str()
        .unwrap()
        .to_string();

    app.authed("DELETE", &format!("/api/snippets/{id}"), None).await;

    let response = app
        .request("GET", &format!("/api/s/{share_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_unknown_snippet() {
    let app = helpers::TestApp::new().await;
    let response = set_public(&app, &uuid::Uuid::new_v4().to_string(), true).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
