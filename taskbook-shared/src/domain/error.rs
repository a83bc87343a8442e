use crate::store::StoreError;
use thiserror::Error;

/// Failures raised by the user and task services
///
/// Every variant carries a message fit for API clients. `Store` wraps
/// infrastructure failures whose details must stay server-side.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("The email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("A user_id is required to create a task")]
    MissingOwner,

    #[error("User with ID {0} does not exist")]
    OwnerNotFound(i64),

    #[error("User with ID {0} not found")]
    UserNotFound(i64),

    #[error("Task with ID {0} not found")]
    TaskNotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// True for business-rule violations (duplicate email, missing or unknown owner)
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateEmail(_) | DomainError::MissingOwner | DomainError::OwnerNotFound(_)
        )
    }

    /// True when the addressed user or task doesn't exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::UserNotFound(_) | DomainError::TaskNotFound(_))
    }
}

/// Domain result type alias
pub type DomainResult<T> = Result<T, DomainError>;
