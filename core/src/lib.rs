pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{StoreError, StoreResult};
pub use input::{expand_key, parse_args, parse_new_task, parse_task_patch, ParsedInput};
pub use model::task::{validate_task_name, NewTask, Priority, Task, TaskPatch, TASK_NAME_REQUIRED};
pub use repository::{
    FileTaskRepository, InMemoryTaskRepository, SharedRepository, StoreLocation, TaskRepository,
};
pub use service::dto::ApiResponse;
pub use service::task_service::TaskService;
pub use time::parse_due_date;
