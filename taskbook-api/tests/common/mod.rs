/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An application router over a fresh in-memory store
/// - Request helpers returning status and parsed JSON body
/// - User/task creation shortcuts

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use taskbook_api::app::{build_router, AppState};
use taskbook_api::config::Config;
use taskbook_shared::store::memory::MemoryStore;
use tower::ServiceExt;

/// Test context containing the application under test
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with an empty store
    pub fn new() -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
        TestContext {
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status and JSON body
    ///
    /// An empty response body is returned as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|err| {
                panic!(
                    "Expected JSON body, got {}: {}",
                    err,
                    String::from_utf8_lossy(&body)
                )
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("GET", uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("DELETE", uri)).await
    }

    pub async fn patch(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request("PATCH", uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, body)).await
    }

    /// Creates a user and returns its id
    pub async fn create_user(&self, name: &str, email: &str) -> i64 {
        let (status, body) = self
            .post_json("/api/users", json!({"name": name, "email": email}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
        body["user"]["id"].as_i64().unwrap()
    }

    /// Creates a task and returns its id
    pub async fn create_task(&self, title: &str, user_id: i64) -> i64 {
        let (status, body) = self
            .post_json("/api/tasks", json!({"title": title, "user_id": user_id}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
        body["task"]["id"].as_i64().unwrap()
    }
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    raw_json_request(method, uri, body.to_string())
}

/// JSON request with an arbitrary (possibly malformed) body
pub fn raw_json_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}
