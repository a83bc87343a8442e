/// PostgreSQL-backed entity store
///
/// Delegates to the SQL in [`crate::models`] and lets the schema enforce the
/// constraints (`users_email_key`, `tasks_user_id_fkey ... ON DELETE CASCADE`).

use super::{EntityStore, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    task::{CreateTask, Task},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Entity store over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, used for shutdown and migrations
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        // A unique violation aborts the transaction; dropping `tx` rolls it back.
        let mut tx = self.pool.begin().await?;
        let user = User::create(&mut *tx, data).await?;
        tx.commit().await?;

        debug!(user_id = user.id, "Inserted user row");
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        Ok(User::delete(&self.pool, id).await?)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let task = Task::create(&self.pool, data).await?;
        debug!(task_id = task.id, user_id = task.user_id, "Inserted task row");
        Ok(task)
    }

    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>> {
        Ok(Task::find_by_id(&self.pool, id).await?)
    }

    async fn list_tasks_by_user(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        Ok(Task::list_by_user(&self.pool, user_id).await?)
    }

    async fn set_task_completed(&self, id: i64, completed: bool) -> StoreResult<Option<Task>> {
        Ok(Task::set_completed(&self.pool, id, completed).await?)
    }

    async fn delete_task(&self, id: i64) -> StoreResult<bool> {
        Ok(Task::delete(&self.pool, id).await?)
    }
}
