mod api;
mod tui;
mod view;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskboard_core::{parse_new_task, parse_task_patch, Task};
use uuid::Uuid;

use crate::api::{HttpTaskApi, TaskApi, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Terminal client for the task board API", long_about = None)]
struct Cli {
    /// Base URL of the task server
    #[arg(long, env = "TASKBOARD_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the Terminal User Interface (default)
    Tui,
    /// List all tasks
    List,
    /// Add a task (usage: add Write report pri:high due:2025-06-01)
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Change some fields of a task (usage: update <ID> done:true due:none)
    Update {
        id: Uuid,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    name: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Done")]
    done: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.task_name.clone(),
            priority: task.priority.to_string(),
            due: task.due_label(),
            done: if task.is_done { "✔".to_string() } else { String::new() },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let api = HttpTaskApi::new(cli.server)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        None | Some(Commands::Tui) => {
            tui::run(&api)?;
        }
        Some(Commands::List) => {
            let tasks = api
                .list_tasks()
                .with_context(|| format!("Failed to fetch tasks from {}", api.base_url()))?;
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }
        Some(Commands::Add { args }) => {
            let new_task = parse_new_task(&args, today)?;
            // Same rule the server enforces, checked before any request goes out.
            if let Err(err) = new_task.validate() {
                bail!("{}", err);
            }
            let response = api.create_task(&new_task)?;
            println!("{}", response.message);
            if let Some(task) = response.data {
                println!("  ID: {}", task.id);
                println!("  Priority: {}", task.priority);
                println!("  Due: {}", task.due_label());
            }
        }
        Some(Commands::Update { id, args }) => {
            let patch = parse_task_patch(&args, today)?;
            if patch.is_empty() {
                bail!("Nothing to update. Give a new name or key:value pairs (priority, due, done).");
            }
            patch.validate()?;
            let response = api.update_task(&id, &patch)?;
            println!("{}", response.message);
        }
        Some(Commands::Delete { id, yes }) => {
            if !yes && !confirm(&format!("Are you sure you want to delete task {}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            let response = api.delete_task(&id)?;
            println!("{}", response.message);
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
