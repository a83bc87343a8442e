/// In-memory entity store
///
/// Keeps users and tasks in ordered maps behind a `tokio::sync::RwLock`.
/// Every write takes the write lock for its whole check-and-insert, so the
/// constraints hold under concurrent callers the same way the database
/// enforces them. Constraint errors carry the same names as the PostgreSQL
/// schema.

use super::{EntityStore, StoreError, StoreResult};
use crate::models::{
    task::{CreateTask, Task, OWNER_FOREIGN_KEY},
    user::{CreateUser, User, EMAIL_UNIQUE_CONSTRAINT},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_task_id: i64,
}

/// Entity store living entirely in process memory
///
/// Cloning shares the underlying tables. IDs start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::UniqueViolation(
                EMAIL_UNIQUE_CONSTRAINT.to_string(),
            ));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            name: data.name,
            email: data.email,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;

        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.user_id != id);

        Ok(true)
    }

    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&data.user_id) {
            return Err(StoreError::ForeignKeyViolation(
                OWNER_FOREIGN_KEY.to_string(),
            ));
        }

        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            title: data.title,
            description: data.description,
            is_completed: false,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn find_task(&self, id: i64) -> StoreResult<Option<Task>> {
        Ok(self.tables.read().await.tasks.get(&id).cloned())
    }

    async fn list_tasks_by_user(&self, user_id: i64) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn set_task_completed(&self, id: i64, completed: bool) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;

        Ok(tables.tasks.get_mut(&id).map(|task| {
            task.is_completed = completed;
            task.clone()
        }))
    }

    async fn delete_task(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}
