//! Business rules for users and tasks
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← taskbook-api routes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Services   │  ← UserService, TaskService (this module)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ EntityStore │  ← PgStore / MemoryStore
//! └─────────────┘
//! ```
//!
//! The existence and uniqueness checks done here are best-effort: a
//! concurrent writer can slip in between the check and the write. The store
//! is the authority, and its constraint violations are translated into the
//! same [`DomainError`] the pre-check would have produced.

pub mod error;
pub mod tasks;
pub mod users;

pub use error::{DomainError, DomainResult};
pub use tasks::TaskService;
pub use users::UserService;
