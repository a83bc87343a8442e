/// Integration tests for the Taskbook API
///
/// These tests drive the full router (extractors, handlers, services and the
/// in-memory store) through `tower::ServiceExt::oneshot`:
/// - User and task lifecycles
/// - Business-rule failures (duplicate email, missing or unknown owner)
/// - Request-shape failures (missing fields, wrong types, malformed bodies)
/// - Not-found handling and cascading deletes

mod common;

use axum::http::StatusCode;
use common::{empty_request, raw_json_request, TestContext};
use serde_json::json;

/// Ana creates a task, completes it, lists it, deletes it, lists again
#[tokio::test]
async fn test_full_task_lifecycle() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json("/api/users", json!({"name": "Ana", "email": "ana@example.com"}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["name"], "Ana");
    assert_eq!(body["user"]["email"], "ana@example.com");
    assert!(body["user"]["created_at"].is_string());
    let user_id = body["user"]["id"].as_i64().unwrap();

    let (status, body) = ctx
        .post_json(
            "/api/tasks",
            json!({"title": "Buy groceries", "user_id": user_id, "description": "Milk"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task"]["title"], "Buy groceries");
    assert_eq!(body["task"]["description"], "Milk");
    assert_eq!(body["task"]["is_completed"], false);
    assert_eq!(body["task"]["user_id"], user_id);
    let task_id = body["task"]["id"].as_i64().unwrap();

    let (status, body) = ctx.patch(&format!("/api/tasks/{}/complete", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task marked as completed");
    assert_eq!(body["task"]["is_completed"], true);

    let (status, body) = ctx.get(&format!("/api/users/{}/tasks", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["total"], 1);
    assert_eq!(body["tasks"][0]["id"], task_id);
    assert_eq!(body["tasks"][0]["is_completed"], true);

    let (status, body) = ctx.delete(&format!("/api/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Task with ID {} deleted successfully", task_id)
    );

    let (status, body) = ctx.get(&format!("/api/users/{}/tasks", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["tasks"], json!([]));
}

#[tokio::test]
async fn test_task_for_unknown_owner_is_rejected() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json("/api/tasks", json!({"title": "Orphan", "user_id": 999}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User with ID 999 does not exist");
    assert_eq!(body["code"], "bad_request");

    // Nothing was stored
    let (status, _) = ctx.get("/api/tasks/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_leaves_original_unchanged() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("Ana", "ana@example.com").await;

    let (status, body) = ctx
        .post_json("/api/users", json!({"name": "Impostor", "email": "ana@example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The email 'ana@example.com' is already registered");

    let (status, body) = ctx.get(&format!("/api/users/{}", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Ana");
    assert!(body.get("message").is_none());

    let (_, body) = ctx.get("/api/users").await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_list_users_in_creation_order() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"users": [], "total": 0}));

    let ana = ctx.create_user("Ana", "ana@example.com").await;
    let bo = ctx.create_user("Bo", "bo@example.com").await;

    let (_, body) = ctx.get("/api/users").await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["users"][0]["id"], ana);
    assert_eq!(body["users"][1]["id"], bo);
}

#[tokio::test]
async fn test_create_user_requires_fields() {
    let ctx = TestContext::new();

    let (status, body) = ctx.post_json("/api/users", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The fields name and email are required");

    let (status, body) = ctx
        .post_json("/api/users", json!({"name": "", "email": "x@example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The field name is required");

    let (status, body) = ctx
        .post_json("/api/users", json!({"name": 7, "email": "x@example.com"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The field name must be a string");
}

#[tokio::test]
async fn test_create_user_rejects_overlong_name() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .post_json(
            "/api/users",
            json!({"name": "x".repeat(101), "email": "long@example.com"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
    assert_eq!(body["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_create_task_treats_falsy_owner_as_missing() {
    let ctx = TestContext::new();
    ctx.create_user("Ana", "ana@example.com").await;

    for owner in [json!(0), json!(null), json!(false), json!("")] {
        let (status, body) = ctx
            .post_json("/api/tasks", json!({"title": "T", "user_id": owner}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "user_id = {}", owner);
        assert_eq!(body["error"], "The field user_id is required");
    }

    let (status, body) = ctx.post_json("/api/tasks", json!({"description": "d"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The fields title and user_id are required");

    let (status, body) = ctx
        .post_json("/api/tasks", json!({"title": "T", "user_id": "1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The field user_id must be an integer");
}

#[tokio::test]
async fn test_create_task_without_description() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("Ana", "ana@example.com").await;

    let (status, body) = ctx
        .post_json("/api/tasks", json!({"title": "Plain", "user_id": user_id}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["task"]["description"].is_null());

    let task_id = body["task"]["id"].as_i64().unwrap();
    let (status, body) = ctx.get(&format!("/api/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["title"], "Plain");
}

#[tokio::test]
async fn test_update_task_completion() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("Ana", "ana@example.com").await;
    let task_id = ctx.create_task("Toggle", user_id).await;
    let uri = format!("/api/tasks/{}", task_id);

    let (status, body) = ctx.put_json(&uri, json!({"is_completed": true})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated successfully");
    assert_eq!(body["task"]["is_completed"], true);

    // Repeating the update is idempotent
    let (status, again) = ctx.put_json(&uri, json!({"is_completed": true})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["task"], body["task"]);

    let (status, body) = ctx.put_json(&uri, json!({"is_completed": false})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["is_completed"], false);
}

#[tokio::test]
async fn test_update_task_rejects_bad_input() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("Ana", "ana@example.com").await;
    let task_id = ctx.create_task("Strict", user_id).await;
    let uri = format!("/api/tasks/{}", task_id);

    let (status, body) = ctx.put_json(&uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The field is_completed is required");

    for value in [json!("true"), json!(1), json!(null)] {
        let (status, body) = ctx.put_json(&uri, json!({"is_completed": value})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The field is_completed must be a boolean");
    }

    let (status, _) = ctx.put_json("/api/tasks/999", json!({"is_completed": true})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected() {
    let ctx = TestContext::new();

    let cases = [
        raw_json_request("POST", "/api/users", "{not json"),
        raw_json_request("POST", "/api/users", ""),
        raw_json_request("POST", "/api/users", "[\"Ana\", \"ana@example.com\"]"),
        raw_json_request("POST", "/api/tasks", "\"just a string\""),
        empty_request("POST", "/api/users"),
    ];

    for request in cases {
        let (status, body) = ctx.send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    let (_, body) = ctx.get("/api/users").await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_non_integer_ids_are_rejected() {
    let ctx = TestContext::new();

    for uri in ["/api/users/abc", "/api/tasks/1.5", "/api/users/x/tasks"] {
        let (status, body) = ctx.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "bad_request");
    }
}

#[tokio::test]
async fn test_missing_resources_return_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/api/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with ID 42 not found");
    assert_eq!(body["code"], "not_found");

    let (status, body) = ctx.get("/api/users/42/tasks").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with ID 42 not found");

    let (status, body) = ctx.get("/api/tasks/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task with ID 7 not found");

    assert_eq!(ctx.patch("/api/tasks/7/complete").await.0, StatusCode::NOT_FOUND);
    assert_eq!(ctx.delete("/api/tasks/7").await.0, StatusCode::NOT_FOUND);
    assert_eq!(ctx.delete("/api/users/42").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_task_twice() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("Ana", "ana@example.com").await;
    let task_id = ctx.create_task("Once", user_id).await;

    assert_eq!(
        ctx.delete(&format!("/api/tasks/{}", task_id)).await.0,
        StatusCode::OK
    );
    assert_eq!(
        ctx.get(&format!("/api/tasks/{}", task_id)).await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ctx.delete(&format!("/api/tasks/{}", task_id)).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_deleting_user_cascades_to_tasks() {
    let ctx = TestContext::new();
    let ana = ctx.create_user("Ana", "ana@example.com").await;
    let bo = ctx.create_user("Bo", "bo@example.com").await;
    let first = ctx.create_task("a", ana).await;
    let second = ctx.create_task("b", ana).await;
    let kept = ctx.create_task("c", bo).await;

    let (status, body) = ctx.delete(&format!("/api/users/{}", ana)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("User with ID {} deleted successfully", ana));

    for task_id in [first, second] {
        let (status, _) = ctx.get(&format!("/api/tasks/{}", task_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    assert_eq!(
        ctx.get(&format!("/api/tasks/{}", kept)).await.0,
        StatusCode::OK
    );

    // The email is free again
    ctx.create_user("Ana again", "ana@example.com").await;
}

#[tokio::test]
async fn test_index_and_health() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Taskbook API");
    assert!(body["endpoints"]["tasks"]["POST /api/tasks"].is_string());

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory: connected");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
