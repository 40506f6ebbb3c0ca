//! Error responses.
//!
//! Failures use the same envelope as successes, with `success: false` and a
//! message the client can show as-is.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use taskboard_core::service::dto::{MSG_INTERNAL_ERROR, MSG_TASK_NOT_FOUND};
use taskboard_core::{ApiResponse, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, MSG_TASK_NOT_FOUND)
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_ERROR)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::failure(self.message))).into_response()
    }
}

impl From<StoreError> for ApiErrorResponse {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Validation(message) => Self::bad_request(message),
            StoreError::NotFound(_) => Self::not_found(),
            // Storage details stay in the log.
            StoreError::Storage(detail) => {
                tracing::error!(%detail, "task store failure");
                Self::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_store_error_mapping() {
        let validation = ApiErrorResponse::from(StoreError::Validation("Task name is required".into()));
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.message, "Task name is required");

        let missing = ApiErrorResponse::from(StoreError::NotFound(Uuid::new_v4()));
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.message, MSG_TASK_NOT_FOUND);

        let storage = ApiErrorResponse::from(StoreError::Storage("disk on fire".into()));
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!storage.message.contains("disk"));
    }
}
