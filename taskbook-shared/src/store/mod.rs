/// Entity store abstraction
///
/// The domain services never talk to a database directly. They receive a
/// [`SharedStore`] handle and go through the [`EntityStore`] trait, which
/// has two implementations:
///
/// - [`postgres::PgStore`]: production backend over a sqlx `PgPool`
/// - [`memory::MemoryStore`]: in-process tables for tests and local runs
///
/// Both backends enforce the same constraints: unique user email, task owner
/// must exist, and deleting a user deletes its tasks. Constraint violations
/// surface as [`StoreError::UniqueViolation`] / [`StoreError::ForeignKeyViolation`]
/// so callers can translate them into domain errors.

pub mod memory;
pub mod postgres;

use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by an [`EntityStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (carries the constraint name)
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key rejected the write (carries the constraint name)
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other backend failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();

            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint);
            }
        }

        StoreError::Database(err)
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations needed by the user and task services
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Short backend name reported by the health endpoint
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Inserts a user; fails with `UniqueViolation` on a taken email
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User>;

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Deletes a user and, by cascade, all of its tasks
    async fn delete_user(&self, id: i64) -> StoreResult<bool>;

    /// Inserts a task; fails with `ForeignKeyViolation` if the owner is missing
    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task>;

    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>>;

    async fn list_tasks_by_user(&self, user_id: i64) -> StoreResult<Vec<Task>>;

    /// Writes `is_completed`; returns None if the task doesn't exist
    async fn set_task_completed(&self, id: i64, completed: bool) -> StoreResult<Option<Task>>;

    async fn delete_task(&self, id: i64) -> StoreResult<bool>;
}

/// Store handle injected into services and application state
pub type SharedStore = Arc<dyn EntityStore>;
