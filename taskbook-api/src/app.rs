/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskbook_api::{app::AppState, config::Config};
/// use taskbook_shared::store::memory::MemoryStore;
///
/// let state = AppState::new(Arc::new(MemoryStore::new()), Config::in_memory());
/// let app = taskbook_api::app::build_router(state);
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use taskbook_shared::domain::{TaskService, UserService};
use taskbook_shared::store::SharedStore;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is a handle, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Entity store backing both services
    pub store: SharedStore,

    /// User business logic
    pub users: UserService,

    /// Task business logic
    pub tasks: TaskService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the services over a single store handle
    pub fn new(store: SharedStore, config: Config) -> Self {
        let users = UserService::new(store.clone());
        let tasks = TaskService::new(store.clone(), users.clone());

        Self {
            store,
            users,
            tasks,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                         # API description
/// ├── GET /health                   # Health check
/// └── /api/
///     ├── /users
///     │   ├── POST   /              # Create user
///     │   ├── GET    /              # List users
///     │   ├── GET    /:id           # Get user
///     │   ├── DELETE /:id           # Delete user (cascades to tasks)
///     │   └── GET    /:id/tasks     # List a user's tasks
///     └── /tasks
///         ├── POST   /              # Create task
///         ├── GET    /:id           # Get task
///         ├── PUT    /:id           # Set completion
///         ├── DELETE /:id           # Delete task
///         └── PATCH  /:id/complete  # Mark completed
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let user_routes = Router::new()
        .route("/", get(routes::users::list_users).post(routes::users::create_user))
        .route(
            "/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route("/:id/tasks", get(routes::tasks::list_user_tasks));

    let task_routes = Router::new()
        .route("/", axum::routing::post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/complete", patch(routes::tasks::complete_task));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
