/// Task model and database operations
///
/// A task belongs to exactly one user for its whole life. After creation only
/// `is_completed` can change.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id BIGINT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT tasks_user_id_fkey FOREIGN KEY (user_id)
///         REFERENCES users (id) ON DELETE CASCADE
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Name of the foreign key tying `tasks.user_id` to `users.id`
pub const OWNER_FOREIGN_KEY: &str = "tasks_user_id_fkey";

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// New tasks always start with `is_completed = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub user_id: i64,
}

impl Task {
    /// Inserts a new, not yet completed task
    ///
    /// # Errors
    ///
    /// Returns a database error carrying [`OWNER_FOREIGN_KEY`] if `user_id`
    /// does not reference an existing user.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id, is_completed)
            VALUES ($1, $2, $3, FALSE)
            RETURNING id, title, description, is_completed, user_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, is_completed, user_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks in insertion order
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, is_completed, user_id, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Sets the completion flag
    ///
    /// This is the only UPDATE issued against `tasks`; no other column is
    /// ever written after insert.
    ///
    /// # Returns
    ///
    /// The updated task, or None if no task has this ID
    pub async fn set_completed(
        pool: &PgPool,
        id: i64,
        completed: bool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = $2
            WHERE id = $1
            RETURNING id, title, description, is_completed, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
