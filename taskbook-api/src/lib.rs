//! # Taskbook API Server Library
//!
//! This library provides the HTTP layer of Taskbook: users and the tasks
//! they own, exposed as a JSON REST API.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Request extractors and field checks
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
