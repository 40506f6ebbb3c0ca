use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::repository::TaskRepository;

/// The task store: validation in front of a repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fails with `StoreError::Validation` before touching the repository when the name is blank.
    pub fn create_task(&self, new_task: NewTask) -> StoreResult<Task> {
        new_task.validate()?;
        let created = self.repo.create(Task::from_new(new_task))?;
        tracing::debug!(id = %created.id, "task created");
        Ok(created)
    }

    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.repo.list()
    }

    pub fn get_task(&self, id: &Uuid) -> StoreResult<Task> {
        self.repo.get(id)
    }

    /// Partial update: the task must exist and every present field must be valid.
    pub fn update_task(&self, id: &Uuid, patch: TaskPatch) -> StoreResult<Task> {
        let mut task = self.repo.get(id)?;
        patch.validate()?;
        task.apply(patch);
        self.repo.update(&task)?;
        tracing::debug!(id = %task.id, "task updated");
        Ok(task)
    }

    pub fn delete_task(&self, id: &Uuid) -> StoreResult<()> {
        self.repo.delete(id)?;
        tracing::debug!(%id, "task deleted");
        Ok(())
    }
}
