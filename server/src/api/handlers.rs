use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use taskboard_core::service::dto::{
    MSG_ALL_TASKS, MSG_TASK_CREATED, MSG_TASK_DELETED, MSG_TASK_UPDATED,
};
use taskboard_core::{
    ApiResponse, NewTask, SharedRepository, StoreError, StoreResult, Task, TaskPatch, TaskService,
};
use uuid::Uuid;

use crate::api::error::ApiErrorResponse;
use crate::api::AppState;

/// `GET /tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiErrorResponse> {
    let tasks = with_service(&state, |service| service.list_tasks()).await?;
    Ok(Json(ApiResponse::ok(MSG_ALL_TASKS, tasks)))
}

/// `POST /tasks` → 201 with the stored task.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiErrorResponse> {
    let Json(new_task) = payload?;
    let task = with_service(&state, move |service| service.create_task(new_task))
        .await
        .map_err(|error| {
            tracing::warn!(%error, "create rejected");
            ApiErrorResponse::from(error)
        })?;
    tracing::info!(id = %task.id, name = %task.task_name, "task created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(MSG_TASK_CREATED, task))))
}

/// `PUT /tasks/{id}`: partial update, absent fields are kept.
///
/// An unknown id is reported before the body is looked at.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<Task>>, ApiErrorResponse> {
    let id = parse_task_id(&id)?;
    with_service(&state, move |service| service.get_task(&id))
        .await
        .map_err(|error| {
            tracing::warn!(%id, %error, "update rejected");
            ApiErrorResponse::from(error)
        })?;
    let Json(patch) = payload?;
    let task = with_service(&state, move |service| service.update_task(&id, patch))
        .await
        .map_err(|error| {
            tracing::warn!(%id, %error, "update rejected");
            ApiErrorResponse::from(error)
        })?;
    tracing::info!(%id, "task updated");
    Ok(Json(ApiResponse::ok(MSG_TASK_UPDATED, task)))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiErrorResponse> {
    let id = parse_task_id(&id)?;
    with_service(&state, move |service| service.delete_task(&id))
        .await
        .map_err(|error| {
            tracing::warn!(%id, %error, "delete rejected");
            ApiErrorResponse::from(error)
        })?;
    tracing::info!(%id, "task deleted");
    Ok(Json(ApiResponse::ok_empty(MSG_TASK_DELETED)))
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// The store does blocking file IO, so calls run off the async workers.
async fn with_service<T, F>(state: &AppState, f: F) -> StoreResult<T>
where
    F: FnOnce(&TaskService<SharedRepository>) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || f(service.as_ref()))
        .await
        .map_err(|error| StoreError::Storage(format!("store task failed: {error}")))?
}

// An id that cannot name a stored task is reported the same way as an unknown one.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| ApiErrorResponse::not_found())
}
