/// Task endpoints
///
/// # Endpoints
///
/// - `POST /api/tasks` - Create task
/// - `GET /api/tasks/:id` - Get task
/// - `PUT /api/tasks/:id` - Set completion state
/// - `PATCH /api/tasks/:id/complete` - Mark completed
/// - `DELETE /api/tasks/:id` - Delete task
/// - `GET /api/users/:id/tasks` - List a user's tasks

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{bool_field, missing_fields, owner_field, text_field, IdPath, JsonBody, JsonObject},
    routes::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use taskbook_shared::{domain::DomainError, models::task::Task};
use validator::Validate;

/// Checked input for task creation
///
/// `user_id` stays optional here: a missing owner is a domain rule and is
/// reported by the task service.
#[derive(Debug, Validate)]
pub struct NewTask {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    pub user_id: Option<i64>,

    pub description: Option<String>,
}

impl TryFrom<JsonObject> for NewTask {
    type Error = ApiError;

    fn try_from(mut body: JsonObject) -> Result<Self, Self::Error> {
        let title = text_field("title", body.remove("title"))?;
        let user_id = owner_field("user_id", body.remove("user_id"))?;
        let description = match body.remove("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => {
                return Err(ApiError::BadRequest(
                    "The field description must be a string".to_string(),
                ))
            }
        };

        match (title, user_id) {
            (Some(title), Some(user_id)) => Ok(Self {
                title,
                user_id: Some(user_id),
                description,
            }),
            (None, None) => Err(missing_fields(&["title", "user_id"])),
            (None, Some(_)) => Err(missing_fields(&["title"])),
            (Some(_), None) => Err(missing_fields(&["user_id"])),
        }
    }
}

/// Single task response, with a message on writes
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub task: Task,
}

/// Tasks of one user
#[derive(Debug, Serialize)]
pub struct UserTasksResponse {
    pub user_id: i64,
    pub tasks: Vec<Task>,
    pub total: usize,
}

/// Create a task for an existing user
///
/// ```text
/// POST /api/tasks
/// Content-Type: application/json
///
/// { "title": "Buy groceries", "user_id": 1, "description": "Milk and bread" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing title or owner, wrong-typed field, or the
///   owner does not exist
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<JsonObject>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let req = NewTask::try_from(body)?;
    req.validate()?;

    let task = state
        .tasks
        .create(&req.title, req.user_id, req.description.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: Some("Task created successfully".to_string()),
            task,
        }),
    ))
}

/// Get one task
pub async fn get_task(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .tasks
        .get_by_id(id)
        .await?
        .ok_or(DomainError::TaskNotFound(id))?;

    Ok(Json(TaskResponse {
        message: None,
        task,
    }))
}

/// List the tasks of a user
///
/// # Errors
///
/// - `404 Not Found`: the user does not exist
pub async fn list_user_tasks(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<i64>,
) -> ApiResult<Json<UserTasksResponse>> {
    if !state.users.exists(user_id).await? {
        return Err(DomainError::UserNotFound(user_id).into());
    }

    let tasks = state.tasks.list_by_user(user_id).await?;

    Ok(Json(UserTasksResponse {
        user_id,
        total: tasks.len(),
        tasks,
    }))
}

/// Set a task's completion state
///
/// ```text
/// PUT /api/tasks/:id
/// Content-Type: application/json
///
/// { "is_completed": true }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `is_completed` missing or not a boolean
/// - `404 Not Found`: no task with this id
pub async fn update_task(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
    JsonBody(mut body): JsonBody<JsonObject>,
) -> ApiResult<Json<TaskResponse>> {
    let completed = bool_field("is_completed", body.remove("is_completed"))?;

    let task = state.tasks.set_completion(id, completed).await?;

    Ok(Json(TaskResponse {
        message: Some("Task updated successfully".to_string()),
        task,
    }))
}

/// Mark a task as completed
pub async fn complete_task(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.mark_completed(id).await?;

    Ok(Json(TaskResponse {
        message: Some("Task marked as completed".to_string()),
        task,
    }))
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.tasks.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Task with ID {} deleted successfully", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_task(value: Value) -> Result<NewTask, ApiError> {
        match value {
            Value::Object(map) => NewTask::try_from(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_new_task_reports_missing_fields() {
        let err = new_task(json!({"description": "only"})).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: The fields title and user_id are required");

        let err = new_task(json!({"title": "T", "user_id": 0})).unwrap_err();
        assert_eq!(err.to_string(), "Bad request: The field user_id is required");
    }

    #[test]
    fn test_new_task_description_is_optional() {
        let task = new_task(json!({"title": "T", "user_id": 3})).unwrap();
        assert_eq!(task.user_id, Some(3));
        assert_eq!(task.description, None);

        let task = new_task(json!({"title": "T", "user_id": 3, "description": "d"})).unwrap();
        assert_eq!(task.description.as_deref(), Some("d"));

        assert!(new_task(json!({"title": "T", "user_id": 3, "description": 5})).is_err());
    }

    #[test]
    fn test_new_task_title_length() {
        let task = new_task(json!({"title": "x".repeat(201), "user_id": 1})).unwrap();
        assert!(task.validate().is_err());
    }
}
