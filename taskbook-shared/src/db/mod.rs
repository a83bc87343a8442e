/// Database layer for Taskbook
///
/// This module provides PostgreSQL connection pooling and the schema migrator.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded sqlx migrations (`taskbook-shared/migrations/`)
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
