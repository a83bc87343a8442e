/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `index`: API description document
/// - `health`: Health check endpoint
/// - `users`: User endpoints
/// - `tasks`: Task endpoints

pub mod health;
pub mod index;
pub mod tasks;
pub mod users;

use serde::Serialize;

/// Plain confirmation body, used by deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
