use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::date;

pub const TASK_NAME_REQUIRED: &str = "Task name is required";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Lenient parse for hand-typed input (`h`, `med`, `LOW`, ...).
    pub fn parse(input: &str) -> Option<Priority> {
        match input.trim().to_lowercase().as_str() {
            "h" | "high" => Some(Priority::High),
            "m" | "med" | "medium" => Some(Priority::Medium),
            "l" | "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }

    pub fn previous(self) -> Priority {
        match self {
            Priority::Low => Priority::High,
            Priority::Medium => Priority::Low,
            Priority::High => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

/// A stored task document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub task_name: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "date::optional::deserialize"
    )]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Builds a stored task from a create request. The id is assigned here and never changes.
    pub fn from_new(new_task: NewTask) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            task_name: new_task.task_name,
            is_done: new_task.is_done,
            priority: new_task.priority,
            due_date: new_task.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies only the fields present in `patch`. Validation is the caller's job.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.task_name {
            self.task_name = name;
        }
        if let Some(done) = patch.is_done {
            self.is_done = done;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due) = patch.due_date {
            self.due_date = due;
        }
        self.updated_at = Utc::now();
    }

    pub fn due_label(&self) -> String {
        self.due_date
            .map(|d| d.format(date::WIRE_FORMAT).to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Body of a create request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "date::optional::deserialize"
    )]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn validate(&self) -> StoreResult<()> {
        validate_task_name(&self.task_name)
    }
}

/// Body of an update request. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "date::patch::deserialize"
    )]
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.task_name.is_none()
            && self.is_done.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    pub fn validate(&self) -> StoreResult<()> {
        match &self.task_name {
            Some(name) => validate_task_name(name),
            None => Ok(()),
        }
    }
}

/// A name made only of whitespace counts as empty.
pub fn validate_task_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation(TASK_NAME_REQUIRED.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_task_defaults() {
        let new_task: NewTask = serde_json::from_value(json!({ "taskName": "Write report" })).unwrap();
        assert_eq!(new_task.priority, Priority::Medium);
        assert!(!new_task.is_done);
        assert_eq!(new_task.due_date, None);
    }

    #[test]
    fn test_new_task_blank_due_date() {
        let new_task: NewTask = serde_json::from_value(json!({
            "taskName": "Write report",
            "isDone": false,
            "priority": "High",
            "dueDate": ""
        }))
        .unwrap();
        assert_eq!(new_task.priority, Priority::High);
        assert_eq!(new_task.due_date, None);
    }

    #[test]
    fn test_task_wire_shape() {
        let new_task = NewTask::new("Write report")
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 6, 1));
        let task = Task::from_new(new_task);

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["_id"], json!(task.id.to_string()));
        assert_eq!(value["taskName"], json!("Write report"));
        assert_eq!(value["isDone"], json!(false));
        assert_eq!(value["priority"], json!("High"));
        assert_eq!(value["dueDate"], json!("2025-06-01"));

        let no_due = Task::from_new(NewTask::new("Other"));
        let value = serde_json::to_value(&no_due).unwrap();
        assert!(value.get("dueDate").is_none());
        assert_eq!(no_due.due_label(), "N/A");
    }

    #[test]
    fn test_patch_due_date_states() {
        let absent: TaskPatch = serde_json::from_value(json!({ "isDone": true })).unwrap();
        assert_eq!(absent.due_date, None);

        let cleared: TaskPatch = serde_json::from_value(json!({ "dueDate": null })).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let blank: TaskPatch = serde_json::from_value(json!({ "dueDate": "" })).unwrap();
        assert_eq!(blank.due_date, Some(None));

        let set: TaskPatch = serde_json::from_value(json!({ "dueDate": "2025-06-01" })).unwrap();
        assert_eq!(set.due_date, Some(NaiveDate::from_ymd_opt(2025, 6, 1)));
    }

    #[test]
    fn test_apply_patch_is_partial() {
        let mut task = Task::from_new(
            NewTask::new("Write report").with_due_date(NaiveDate::from_ymd_opt(2025, 6, 1)),
        );
        task.apply(TaskPatch {
            is_done: Some(true),
            ..TaskPatch::default()
        });
        assert!(task.is_done);
        assert_eq!(task.task_name, "Write report");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 6, 1));

        task.apply(TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        });
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_validate_task_name() {
        assert!(validate_task_name("Buy milk").is_ok());
        assert!(matches!(validate_task_name(""), Err(StoreError::Validation(_))));
        assert!(matches!(validate_task_name("   "), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::parse("H"), Some(Priority::High));
        assert_eq!(Priority::parse("med"), Some(Priority::Medium));
        assert_eq!(Priority::parse("low"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.previous(), Priority::High);
    }
}
