/// User endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Create user
/// - `GET /api/users` - List users
/// - `GET /api/users/:id` - Get user
/// - `DELETE /api/users/:id` - Delete user and its tasks

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{missing_fields, text_field, IdPath, JsonBody, JsonObject},
    routes::MessageResponse,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use taskbook_shared::{domain::DomainError, models::user::User};
use validator::Validate;

/// Checked input for user creation
#[derive(Debug, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "Email must be between 1 and 120 characters"))]
    pub email: String,
}

impl TryFrom<JsonObject> for NewUser {
    type Error = ApiError;

    fn try_from(mut body: JsonObject) -> Result<Self, Self::Error> {
        let name = text_field("name", body.remove("name"))?;
        let email = text_field("email", body.remove("email"))?;

        match (name, email) {
            (Some(name), Some(email)) => Ok(Self { name, email }),
            (None, None) => Err(missing_fields(&["name", "email"])),
            (None, Some(_)) => Err(missing_fields(&["name"])),
            (Some(_), None) => Err(missing_fields(&["email"])),
        }
    }
}

/// Single user response, with a message on writes
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub user: User,
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub total: usize,
}

/// Create a user
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// { "name": "Ana", "email": "ana@example.com" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing or wrong-typed field, too-long value, or the
///   email is already registered
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<JsonObject>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let req = NewUser::try_from(body)?;
    req.validate()?;

    let user = state.users.create(&req.name, &req.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: Some("User created successfully".to_string()),
            user,
        }),
    ))
}

/// List all users in creation order
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UserListResponse>> {
    let users = state.users.list_all().await?;

    Ok(Json(UserListResponse {
        total: users.len(),
        users,
    }))
}

/// Get one user
///
/// # Errors
///
/// - `404 Not Found`: no user with this id
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .get_by_id(id)
        .await?
        .ok_or(DomainError::UserNotFound(id))?;

    Ok(Json(UserResponse {
        message: None,
        user,
    }))
}

/// Delete a user together with all of its tasks
///
/// # Errors
///
/// - `404 Not Found`: no user with this id
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.users.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("User with ID {} deleted successfully", id),
    }))
}
