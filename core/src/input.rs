use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;

use crate::model::task::{NewTask, Priority, TaskPatch};
use crate::time::parse_due_date;

/// Metadata keys understood on the command line (`pri:high due:fri done:true`).
pub const TASK_KEYS: [&str; 3] = ["priority", "due", "done"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds a create request from words plus `key:value` tokens.
/// The name is not validated here; the store does that.
pub fn parse_new_task(args: &[String], today: NaiveDate) -> Result<NewTask> {
    let fields = parse_fields(args, today)?;
    if fields.done.is_some() {
        bail!("'done' cannot be set when adding a task");
    }
    Ok(NewTask::new(fields.name)
        .with_priority(fields.priority.unwrap_or_default())
        .with_due_date(fields.due.flatten()))
}

/// Builds a partial update. Free words replace the name; `due:none` clears the due date.
pub fn parse_task_patch(args: &[String], today: NaiveDate) -> Result<TaskPatch> {
    let fields = parse_fields(args, today)?;
    Ok(TaskPatch {
        task_name: (!fields.name.is_empty()).then_some(fields.name),
        is_done: fields.done,
        priority: fields.priority,
        due_date: fields.due,
    })
}

struct TaskFields {
    name: String,
    priority: Option<Priority>,
    due: Option<Option<NaiveDate>>,
    done: Option<bool>,
}

fn parse_fields(args: &[String], today: NaiveDate) -> Result<TaskFields> {
    let parsed = parse_args(args);
    let mut fields = TaskFields {
        name: parsed.name,
        priority: None,
        due: None,
        done: None,
    };

    for (key, value) in parsed.metadata {
        match expand_key(&key, &TASK_KEYS)?.as_str() {
            "priority" => {
                let priority = Priority::parse(&value)
                    .ok_or_else(|| anyhow!("Invalid priority '{}' (use low, medium or high)", value))?;
                fields.priority = Some(priority);
            }
            "due" => {
                fields.due = Some(match value.to_lowercase().as_str() {
                    "" | "none" | "-" => None,
                    _ => Some(parse_due_date(&value, today)?),
                });
            }
            "done" => {
                let done = match value.to_lowercase().as_str() {
                    "true" | "yes" | "y" | "1" => true,
                    "false" | "no" | "n" | "0" => false,
                    _ => bail!("Invalid value for done: '{}'", value),
                };
                fields.done = Some(done);
            }
            _ => {}
        }
    }

    Ok(fields)
}
