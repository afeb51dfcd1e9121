//! Integration tests for folders.

mod helpers;

use helpers::id_of;
use http::StatusCode;
use serde_json::json;

async fn create_folder(app: &helpers::TestApp, name: &str) -> helpers::TestResponse {
    app.authed("POST", "/api/folders", Some(json!({ "name": name })))
        .await
}

#[tokio::test]
async fn test_create_list_rename() {
    let app = helpers::TestApp::new().await;

    let response = create_folder(&app, "  Work ").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], "Work");
    let work = id_of(&response.body["data"]);
    create_folder(&app, "archive").await;

    let list = app.authed("GET", "/api/folders", None).await;
    let names: Vec<&str> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["archive", "Work"]);

    let response = app
        .authed("PUT", &format!("/api/folders/{work}"), Some(json!({"name": "Job"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Job");
}

#[tokio::test]
async fn test_duplicate_and_blank_names() {
    let app = helpers::TestApp::new().await;
    create_folder(&app, "Work").await;

    let response = create_folder(&app, "Work").await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = create_folder(&app, "   ").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_snippet_in_unknown_folder() {
    let app = helpers::TestApp::new().await;
    let response = app
        .authed(
            "POST",
            "/api/snippets",
            Some(json!({
                "name": "lost",
                "description": "d",
                "code": "x",
                "language": "python",
                "folder_id": uuid::Uuid::new_v4(),
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_detaches_snippets() {
    let app = helpers::TestApp::new().await;
    let folder = id_of(&create_folder(&app, "Scratch").await.body["data"]);
    let snippet = id_of(&app.create_snippet("loose", "x").await);

    let response = app
        .authed(
            "PUT",
            &format!("/api/snippets/{snippet}"),
            Some(json!({ "folder_id": folder })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folder_id"], folder.as_str());

    let filtered = app
        .authed("GET", &format!("/api/snippets?folder={folder}"), None)
        .await;
    assert_eq!(filtered.body["data"]["total"], 1);

    let response = app.authed("DELETE", &format!("/api/folders/{folder}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.authed("GET", &format!("/api/snippets/{snippet}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["folder_id"].is_null());

    // Only the folder move above was versioned.
    let versions = app
        .authed("GET", &format!("/api/snippets/{snippet}/versions"), None)
        .await;
    assert_eq!(versions.body["data"].as_array().unwrap().len(), 1);

    let response = app.authed("DELETE", &format!("/api/folders/{folder}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
