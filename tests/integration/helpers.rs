//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use codekeep_api::{AppState, build_app};
use codekeep_core::config::AppConfig;
use codekeep_database::DatabasePool;
use codekeep_database::migration::run_migrations;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Wired application state, for direct service access
    pub state: AppState,
    /// API key of the default account
    pub api_key: String,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory database
    pub async fn new() -> Self {
        let config = AppConfig::default();

        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config.clone(), db).expect("Failed to build state");
        let account = state
            .account_service
            .default_account()
            .await
            .expect("Failed to create default account");

        let router = build_app(state.clone(), &config.server.cors);

        Self {
            router,
            state,
            api_key: account.api_key,
        }
    }

    /// Send a request authenticated with the default account's key
    pub async fn authed(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(&format!("Bearer {}", self.api_key)))
            .await
    }

    /// Create a snippet through the API and return its JSON
    pub async fn create_snippet(&self, name: &str, code: &str) -> Value {
        let response = self
            .authed(
                "POST",
                "/api/snippets",
                Some(serde_json::json!({
                    "name": name,
                    "description": format!("{name} description"),
                    "code": code,
                    "language": "python",
                    "tags": ["demo"],
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"].clone()
    }

    /// Send a request with an optional raw `Authorization` header value
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(value) = authorization {
            req = req.header("Authorization", value);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Parsed test response
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// The `id` field of a JSON object as a string
pub fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("missing id").to_string()
}
