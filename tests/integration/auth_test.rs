//! Integration tests for API key authentication.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_v1_snippets_with_valid_key() {
    let app = helpers::TestApp::new().await;
    app.create_snippet("first", "print(1)").await;
    app.create_snippet("second", "print(2)").await;

    let response = app.authed("GET", "/api/v1/snippets", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body.as_array().expect("bare array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "second");
    assert_eq!(items[1]["name"], "first");
}

#[tokio::test]
async fn test_rejected_authorization_headers() {
    let app = helpers::TestApp::new().await;
    let wrong_scheme = format!("Basic {}", app.api_key);
    let lowercase = format!("bearer {}", app.api_key);

    for header in [
        None,
        Some(wrong_scheme.as_str()),
        Some(lowercase.as_str()),
        Some("Bearer "),
        Some("Bearer ck_live_00000000000000000000000000000000"),
    ] {
        let response = app.request("GET", "/api/v1/snippets", None, header).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{header:?}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_api_key_prefix_and_lookup_is_exact() {
    let app = helpers::TestApp::new().await;
    assert!(app.api_key.starts_with("ck_live_"));
    assert_eq!(app.api_key.len(), "ck_live_".len() + 32);

    let upper = format!("Bearer {}", app.api_key.to_uppercase());
    let response = app.request("GET", "/api/v1/snippets", None, Some(&upper)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rotated_key_replaces_old_key() {
    let app = helpers::TestApp::new().await;
    let old = format!("Bearer {}", app.api_key);

    let response = app.authed("POST", "/api/account/api-key", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let new_key = response.body["data"]["api_key"].as_str().unwrap().to_string();
    assert_ne!(new_key, app.api_key);

    let response = app.request("GET", "/api/account", None, Some(&old)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let fresh = format!("Bearer {new_key}");
    let response = app.request("GET", "/api/account", None, Some(&fresh)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "default");
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
