use crate::domain::error::{DomainError, DomainResult};
use crate::models::user::{CreateUser, User};
use crate::store::{SharedStore, StoreError};
use tracing::{info, instrument, warn};

/// Service layer for user business logic
#[derive(Clone)]
pub struct UserService {
    store: SharedStore,
}

impl UserService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Creates a user with a unique email
    ///
    /// The email is looked up first; if a concurrent request registers the
    /// same address in between, the store's unique constraint rejects the
    /// insert and the result is the same `DuplicateEmail`.
    #[instrument(skip(self, name))]
    pub async fn create(&self, name: &str, email: &str) -> DomainResult<User> {
        if self.store.find_user_by_email(email).await?.is_some() {
            warn!("Rejected user with duplicate email");
            return Err(DomainError::DuplicateEmail(email.to_string()));
        }

        let user = self
            .store
            .insert_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation(_) => {
                    warn!("Email taken concurrently, insert rolled back");
                    DomainError::DuplicateEmail(email.to_string())
                }
                other => DomainError::Store(other),
            })?;

        info!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Looks up a user; absence is not an error
    pub async fn get_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.store.find_user(id).await?)
    }

    pub async fn exists(&self, id: i64) -> DomainResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    pub async fn list_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    /// Deletes a user together with all of its tasks
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.store.delete_user(id).await? {
            return Err(DomainError::UserNotFound(id));
        }

        info!(user_id = id, "Deleted user and its tasks");
        Ok(())
    }
}
