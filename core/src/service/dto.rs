use serde::{Deserialize, Serialize};

pub const MSG_TASK_CREATED: &str = "Task created successfully";
pub const MSG_ALL_TASKS: &str = "All tasks";
pub const MSG_TASK_UPDATED: &str = "Task updated";
pub const MSG_TASK_DELETED: &str = "Task deleted";
pub const MSG_TASK_NOT_FOUND: &str = "Task not found";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error";

/// Envelope returned by every endpoint, success or not.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_data() {
        let body = ApiResponse::<()>::failure(MSG_TASK_NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "success": false, "message": "Task not found" })
        );
    }

    #[test]
    fn test_decode_without_message() {
        let body: ApiResponse<Vec<u32>> = serde_json::from_value(json!({ "success": true, "data": [1, 2] })).unwrap();
        assert_eq!(body.data, Some(vec![1, 2]));
        assert!(body.message.is_empty());
    }
}
