// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use routemate_api::config::Config;
use routemate_api::routes::create_router;
use routemate_api::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token the fake provider accepts in `mock_signed_in_user`.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-access-token";

/// Create a test app whose provider is a fresh mock server.
/// Returns the router, the shared state and the server to mount mocks on.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>, MockServer) {
    let server = MockServer::start().await;

    let mut config = Config::test_default();
    config.supabase_url = server.uri();

    let state = Arc::new(AppState::new(config).expect("Failed to build test state"));
    (create_router(state.clone()), state, server)
}

/// User object in the provider's shape.
#[allow(dead_code)]
pub fn provider_user(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "aud": "authenticated",
        "email": email,
        "user_metadata": { "full_name": "Test Rider", "phone": "+94770000000" },
        "created_at": "2025-03-01T10:00:00.123456Z",
        "email_confirmed_at": "2025-03-01T10:05:00Z"
    })
}

/// Session in the provider's shape.
#[allow(dead_code)]
pub fn provider_session(user: Value) -> Value {
    json!({
        "access_token": "new-access-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1740826800,
        "refresh_token": "new-refresh-token",
        "user": user
    })
}

/// Make the provider resolve `TEST_TOKEN` to a user with this id.
#[allow(dead_code)]
pub async fn mock_signed_in_user(server: &MockServer, user_id: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(wiremock::matchers::header(
            "authorization",
            format!("Bearer {}", TEST_TOKEN).as_str(),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(provider_user(user_id, "rider@example.com")),
        )
        .mount(server)
        .await;
}

/// Send one request and return status, headers and the decoded JSON body
/// (`Value::Null` for an empty body).
#[allow(dead_code)]
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}
