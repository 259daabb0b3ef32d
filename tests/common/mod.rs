//! Test utilities: app builder, wiremock upstream, request helpers.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use vos_gateway::config::Config;
use vos_gateway::session::memory::InMemoryStore;
use vos_gateway::types::SessionUser;
use vos_gateway::{AppState, create_app};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing at a mock upstream under `/api`.
pub fn test_config(upstream: &MockServer) -> Config {
    Config {
        upstream_base_url: format!("{}/api", upstream.uri()),
        upstream_timeout: Duration::from_secs(5),
        ..Config::test_default()
    }
}

/// Build a test app with the default 8-hour store.
pub fn build_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    build_test_app_with_store(config, InMemoryStore::new())
}

pub fn build_test_app_with_store(
    config: Config,
    store: InMemoryStore,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::with_sessions(config, store).expect("failed to build state"));
    let app = create_app(state.clone());
    (app, state)
}

/// Upstream user list used by most tests.
pub fn directory() -> Value {
    json!([
        {"id": 1, "email": "ana@example.com", "password": "s3cret", "name": "Ana Reyes", "department": 2},
        {"id": 2, "email": "ben@example.com", "password": "hunter2", "fullName": "Ben Cruz"},
        {"id": "u-3", "email": "cy@example.com", "password": "pw"}
    ])
}

/// Serve `users` from `GET /api/users`.
pub async fn mount_users(server: &MockServer, users: Value) {
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(server)
        .await;
}

/// Read response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Build a request carrying the session cookie.
pub fn request_with_session(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Cookie", format!("vos_sid={}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request_with_session(
    method: &str,
    uri: &str,
    token: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Cookie", format!("vos_sid={}", token))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Put a session straight into the store, skipping the login round-trip.
pub fn seed_session(state: &AppState, email: &str) -> String {
    use vos_gateway::session::SessionStore;
    state.sessions.create(SessionUser {
        id: json!(1),
        email: email.into(),
        name: "Seeded".into(),
    })
}

/// Extract the `vos_sid` value from a response's Set-Cookie header.
pub fn session_cookie_value(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            s.split(';')
                .next()
                .and_then(|c| c.strip_prefix("vos_sid="))
                .map(String::from)
        })
}

/// Log in through POST /api/login; returns the session token on success.
pub async fn login(app: &axum::Router, email: &str, password: &str) -> Option<String> {
    let req = json_request(
        "POST",
        "/api/login",
        &json!({"email": email, "password": password}),
    );
    let response = app.clone().oneshot(req).await.unwrap();

    if response.status() == StatusCode::OK {
        session_cookie_value(&response)
    } else {
        None
    }
}
