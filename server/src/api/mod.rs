pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use taskboard_core::{InMemoryTaskRepository, SharedRepository, TaskService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiErrorResponse;
pub use handlers::{create_task, delete_task, health_check, list_tasks, update_task};

/// Shared across requests; the repository is the only mutable state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TaskService<SharedRepository>>,
}

impl AppState {
    pub fn new(repo: SharedRepository) -> Self {
        Self {
            service: Arc::new(TaskService::new(repo)),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(InMemoryTaskRepository::new()))
    }
}

pub fn router(state: AppState) -> Router {
    // The UI is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
