/// Database models for Taskbook
///
/// Each model owns the SQL for its table and exposes it as associated
/// functions taking a `PgPool`.
///
/// # Models
///
/// - `user`: Task owners, unique by email
/// - `task`: Tasks, each referencing exactly one user
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::task::{CreateTask, Task};
/// use taskbook_shared::models::user::{CreateUser, User};
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Ana".to_string(),
///     email: "ana@example.com".to_string(),
/// }).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Write report".to_string(),
///     description: None,
///     user_id: user.id,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
