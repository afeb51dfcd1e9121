//! Integration tests for snippet CRUD, version history and restore.

mod helpers;

use helpers::id_of;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_update_update_restore_scenario() {
    let app = helpers::TestApp::new().await;
    let snippet = app.create_snippet("foo", "a").await;
    let id = id_of(&snippet);

    let response = app
        .authed("PUT", &format!("/api/snippets/{id}"), Some(json!({"code": "b"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["code"], "b");

    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    let list = versions.body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["code"], "a");
    let version_a = id_of(&list[0]);

    app.authed("PUT", &format!("/api/snippets/{id}"), Some(json!({"code": "c"})))
        .await;
    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    let list = versions.body["data"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["code"], "b");

    let restored = app
        .authed("POST", &format!("/api/versions/{version_a}/restore"), None)
        .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.body["data"]["code"], "a");
    assert_eq!(restored.body["data"]["id"], snippet["id"]);
    assert_eq!(restored.body["data"]["created_at"], snippet["created_at"]);

    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    let list = versions.body["data"].as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["code"], "c");
}

#[tokio::test]
async fn test_create_validation() {
    let app = helpers::TestApp::new().await;

    let response = app
        .authed(
            "POST",
            "/api/snippets",
            Some(json!({"name": "x", "description": "d", "code": "a", "language": "python"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .authed(
            "POST",
            "/api/snippets",
            Some(json!({"name": "ok", "description": "d", "code": "", "language": "python"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tags_as_comma_separated_string() {
    let app = helpers::TestApp::new().await;
    let response = app
        .authed(
            "POST",
            "/api/snippets",
            Some(json!({
                "name": "tagged",
                "description": "d",
                "code": "x = 1",
                "language": "python",
                "tags": " web, api ,,web",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["tags"], json!(["web", "api"]));
}

#[tokio::test]
async fn test_clearing_required_field_fails_without_version() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("keep", "a").await);

    let response = app
        .authed("PUT", &format!("/api/snippets/{id}"), Some(json!({"name": null})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    assert!(versions.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_null_tags_clear_them() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("desc", "a").await);

    let response = app
        .authed("PUT", &format!("/api/snippets/{id}"), Some(json!({"tags": null})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["tags"], json!([]));
    assert_eq!(response.body["data"]["name"], "desc");
}

#[tokio::test]
async fn test_description_cannot_be_emptied() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("desc", "a").await);

    for body in [json!({"description": null}), json!({"description": ""})] {
        let response = app
            .authed("PUT", &format!("/api/snippets/{id}"), Some(body))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    let versions = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    assert!(versions.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_cascades_history() {
    let app = helpers::TestApp::new().await;
    let id = id_of(&app.create_snippet("gone", "a").await);
    app.authed("PUT", &format!("/api/snippets/{id}"), Some(json!({"code": "b"})))
        .await;

    let response = app.authed("DELETE", &format!("/api/snippets/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.authed("GET", &format!("/api/snippets/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .authed("GET", &format!("/api/snippets/{id}/versions"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.authed("DELETE", &format!("/api/snippets/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_browse_search_and_sort() {
    let app = helpers::TestApp::new().await;
    app.create_snippet("Beta", "print('hello')").await;
    app.create_snippet("alpha", "print('bye')").await;
    app.create_snippet("gamma", "x = 1").await;

    let response = app.authed("GET", "/api/snippets?sort=a-z", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "Beta", "gamma"]);

    let response = app.authed("GET", "/api/snippets?search=PRINT", None).await;
    assert_eq!(response.body["data"]["total"], 2);
    assert_eq!(response.body["data"]["state"]["search"], "PRINT");

    let response = app.authed("GET", "/api/snippets?sort=sideways", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let app = helpers::TestApp::new().await;

    let response = app.authed("GET", "/api/snippets/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let response = app.authed("GET", &format!("/api/snippets/{unknown}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .authed("POST", &format!("/api/versions/{unknown}/restore"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_dashboard() {
    let app = helpers::TestApp::new().await;
    app.create_snippet("one", "a").await;
    app.create_snippet("two", "b").await;

    let response = app.authed("GET", "/api/stats", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["total_snippets"], 2);
    assert_eq!(data["total_languages"], 1);
    assert_eq!(data["language_distribution"][0]["name"], "python");

    let response = app.authed("GET", "/api/stats/activity?year=2024", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["days"].as_array().unwrap().len(), 366);
}

#[tokio::test]
async fn test_assistant_disabled_is_bad_gateway() {
    let app = helpers::TestApp::new().await;

    let response = app
        .authed(
            "POST",
            "/api/assist/explain",
            Some(json!({"code": "print(1)", "language": "python"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "UPSTREAM_ERROR");

    let response = app
        .authed(
            "POST",
            "/api/assist/summarize",
            Some(json!({"code": "print(1)", "language": "python"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
