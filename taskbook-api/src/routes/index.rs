/// API description document served at `/`

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Taskbook API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "users": {
                "POST /api/users": "Create a user",
                "GET /api/users": "List users",
                "GET /api/users/{id}": "Get a user",
                "DELETE /api/users/{id}": "Delete a user and its tasks",
                "GET /api/users/{id}/tasks": "List a user's tasks"
            },
            "tasks": {
                "POST /api/tasks": "Create a task",
                "GET /api/tasks/{id}": "Get a task",
                "PUT /api/tasks/{id}": "Set a task's completion state",
                "PATCH /api/tasks/{id}/complete": "Mark a task as completed",
                "DELETE /api/tasks/{id}": "Delete a task"
            },
            "health": {
                "GET /health": "Service health"
            }
        }
    }))
}
