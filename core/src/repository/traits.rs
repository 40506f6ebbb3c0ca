use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::task::Task;

/// Persistence port for task documents. Implementations must make a completed
/// write visible to the very next `list`/`get`.
pub trait TaskRepository {
    fn create(&self, task: Task) -> StoreResult<Task>;
    /// All tasks in insertion order.
    fn list(&self) -> StoreResult<Vec<Task>>;
    fn get(&self, id: &Uuid) -> StoreResult<Task>;
    fn update(&self, task: &Task) -> StoreResult<()>;
    fn delete(&self, id: &Uuid) -> StoreResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for Box<R> {
    fn create(&self, task: Task) -> StoreResult<Task> {
        (**self).create(task)
    }

    fn list(&self) -> StoreResult<Vec<Task>> {
        (**self).list()
    }

    fn get(&self, id: &Uuid) -> StoreResult<Task> {
        (**self).get(id)
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        (**self).update(task)
    }

    fn delete(&self, id: &Uuid) -> StoreResult<()> {
        (**self).delete(id)
    }
}
