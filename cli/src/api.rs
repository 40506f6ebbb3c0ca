use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use taskboard_core::{ApiResponse, NewTask, Task, TaskPatch};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// Rejected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a readable answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with `success: false`; the message is meant for the user.
    #[error("{0}")]
    Server(String),
}

/// Client side of the task HTTP contract.
pub trait TaskApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;
    fn create_task(&self, task: &NewTask) -> Result<ApiResponse<Task>, ClientError>;
    fn update_task(&self, id: &Uuid, patch: &TaskPatch) -> Result<ApiResponse<Task>, ClientError>;
    fn delete_task(&self, id: &Uuid) -> Result<ApiResponse<()>, ClientError>;
}

pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Error statuses still carry the envelope, so the body is decoded before the status is judged.
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>, ClientError> {
        let response = request
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let body: ApiResponse<T> = response
            .json()
            .map_err(|e| ClientError::Network(format!("unexpected response ({}): {}", status, e)))?;

        if !body.success {
            return Err(ClientError::Server(body.message));
        }
        Ok(body)
    }
}

impl TaskApi for HttpTaskApi {
    fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let body: ApiResponse<Vec<Task>> = self.send(self.client.get(self.url("/tasks")))?;
        Ok(body.data.unwrap_or_default())
    }

    fn create_task(&self, task: &NewTask) -> Result<ApiResponse<Task>, ClientError> {
        self.send(self.client.post(self.url("/tasks")).json(task))
    }

    fn update_task(&self, id: &Uuid, patch: &TaskPatch) -> Result<ApiResponse<Task>, ClientError> {
        self.send(self.client.put(self.url(&format!("/tasks/{}", id))).json(patch))
    }

    fn delete_task(&self, id: &Uuid) -> Result<ApiResponse<()>, ClientError> {
        self.send(self.client.delete(self.url(&format!("/tasks/{}", id))))
    }
}
