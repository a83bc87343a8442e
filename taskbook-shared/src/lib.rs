//! # Taskbook Shared Library
//!
//! This crate contains the data model, persistence and business rules used by
//! the Taskbook API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their SQL operations
//! - `db`: Connection pooling and schema migrations
//! - `store`: The `EntityStore` abstraction with PostgreSQL and in-memory backends
//! - `domain`: User and task services enforcing uniqueness, ownership and
//!   controlled mutation

pub mod db;
pub mod domain;
pub mod models;
pub mod store;

/// Current version of the Taskbook shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
