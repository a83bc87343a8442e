use crate::domain::error::{DomainError, DomainResult};
use crate::domain::users::UserService;
use crate::models::task::{CreateTask, Task};
use crate::store::{SharedStore, StoreError};
use tracing::{debug, info, instrument, warn};

/// Service layer for task business logic
///
/// Ownership is checked through [`UserService::exists`]; after creation the
/// completion flag is the only field this service ever writes.
#[derive(Clone)]
pub struct TaskService {
    store: SharedStore,
    users: UserService,
}

impl TaskService {
    pub fn new(store: SharedStore, users: UserService) -> Self {
        Self { store, users }
    }

    /// Creates a task owned by `user_id`
    ///
    /// `None` and `Some(0)` both mean "no owner given" and are rejected with
    /// `MissingOwner`. An owner removed between the existence check and the
    /// insert trips the foreign key and yields `OwnerNotFound`.
    #[instrument(skip(self, title, description))]
    pub async fn create(
        &self,
        title: &str,
        user_id: Option<i64>,
        description: Option<&str>,
    ) -> DomainResult<Task> {
        let user_id = match user_id {
            Some(id) if id != 0 => id,
            _ => {
                warn!("Rejected task without owner");
                return Err(DomainError::MissingOwner);
            }
        };

        if !self.users.exists(user_id).await? {
            warn!("Rejected task for unknown owner");
            return Err(DomainError::OwnerNotFound(user_id));
        }

        let task = self
            .store
            .insert_task(CreateTask {
                title: title.to_string(),
                description: description.map(str::to_string),
                user_id,
            })
            .await
            .map_err(|err| match err {
                StoreError::ForeignKeyViolation(_) => DomainError::OwnerNotFound(user_id),
                other => DomainError::Store(other),
            })?;

        info!(task_id = task.id, "Created task");
        Ok(task)
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<Option<Task>> {
        Ok(self.store.find_task(id).await?)
    }

    /// All tasks of one user, in store order
    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Task>> {
        let tasks = self.store.list_tasks_by_user(user_id).await?;
        debug!(user_id, count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Sets `is_completed` to `completed`; repeating the call is a no-op
    #[instrument(skip(self))]
    pub async fn set_completion(&self, id: i64, completed: bool) -> DomainResult<Task> {
        let task = self
            .store
            .set_task_completed(id, completed)
            .await?
            .ok_or(DomainError::TaskNotFound(id))?;

        info!("Updated task completion");
        Ok(task)
    }

    pub async fn mark_completed(&self, id: i64) -> DomainResult<Task> {
        self.set_completion(id, true).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.store.delete_task(id).await? {
            return Err(DomainError::TaskNotFound(id));
        }

        info!("Deleted task");
        Ok(())
    }
}
