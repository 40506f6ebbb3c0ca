use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

/// Volatile store, used for `memory:` locations and in tests.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, task: Task) -> StoreResult<Task> {
        self.tasks.write().push(task.clone());
        Ok(task)
    }

    fn list(&self) -> StoreResult<Vec<Task>> {
        Ok(self.tasks.read().clone())
    }

    fn get(&self, id: &Uuid) -> StoreResult<Task> {
        self.tasks
            .read()
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let mut tasks = self.tasks.write();
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(task.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> StoreResult<()> {
        let mut tasks = self.tasks.write();
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == initial_len {
            return Err(StoreError::NotFound(*id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::NewTask;

    #[test]
    fn test_list_keeps_insertion_order() {
        let repo = InMemoryTaskRepository::new();
        let first = repo.create(Task::from_new(NewTask::new("first"))).unwrap();
        let second = repo.create(Task::from_new(NewTask::new("second"))).unwrap();

        let ids: Vec<Uuid> = repo.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(Task::from_new(NewTask::new("only"))).unwrap();

        repo.delete(&task.id).unwrap();
        assert!(matches!(repo.delete(&task.id), Err(StoreError::NotFound(id)) if id == task.id));
    }

    #[test]
    fn test_update_unknown_task() {
        let repo = InMemoryTaskRepository::new();
        let ghost = Task::from_new(NewTask::new("ghost"));
        assert!(matches!(repo.update(&ghost), Err(StoreError::NotFound(_))));
    }
}
