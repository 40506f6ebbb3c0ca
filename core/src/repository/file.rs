use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

pub const DEFAULT_FILE_NAME: &str = "tasks.json";
pub const DEFAULT_DIR_NAME: &str = ".taskboard";

/// Task documents kept as a JSON array in a single file.
pub struct FileTaskRepository {
    file_path: PathBuf,
    // Serializes read-modify-write cycles between concurrent requests.
    write_lock: Mutex<()>,
}

impl FileTaskRepository {
    /// Opens `tasks.json` inside `base_dir`, or inside `~/.taskboard` when none is given.
    pub fn new(base_dir: Option<PathBuf>) -> StoreResult<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Self::open(dir.join(DEFAULT_FILE_NAME))
    }

    /// Opens (creating if needed) the document file at `path`.
    pub fn open(path: PathBuf) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !path.exists() {
            write_documents(&path, &[])?;
            tracing::info!(path = %path.display(), "initialized empty task store");
        }

        Ok(FileTaskRepository {
            file_path: path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> StoreResult<Vec<Task>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        write_documents(&self.file_path, tasks)
    }
}

pub fn default_data_dir() -> StoreResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| StoreError::Storage("Could not determine home directory".to_string()))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

// Written next to the target and renamed over it, so readers never see a half-written file.
fn write_documents(path: &Path, tasks: &[Task]) -> StoreResult<()> {
    let tmp_path = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> StoreResult<Task> {
        let _guard = self.write_lock.lock();
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn list(&self) -> StoreResult<Vec<Task>> {
        let _guard = self.write_lock.lock();
        self.read_tasks()
    }

    fn get(&self, id: &Uuid) -> StoreResult<Task> {
        self.list()?
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or(StoreError::NotFound(*id))
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut tasks = self.read_tasks()?;
        if let Some(pos) = tasks.iter().position(|t| t.id == task.id) {
            tasks[pos] = task.clone();
            self.write_tasks(&tasks)
        } else {
            Err(StoreError::NotFound(task.id))
        }
    }

    fn delete(&self, id: &Uuid) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);

        if tasks.len() == initial_len {
            return Err(StoreError::NotFound(*id));
        }

        self.write_tasks(&tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{NewTask, Priority, TaskPatch};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_empty_document() {
        let dir = tempdir().unwrap();
        let repo = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(repo.path(), dir.path().join(DEFAULT_FILE_NAME));
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let created = {
            let repo = FileTaskRepository::open(path.clone()).unwrap();
            let new_task = NewTask::new("Write report")
                .with_priority(Priority::High)
                .with_due_date(NaiveDate::from_ymd_opt(2025, 6, 1));
            repo.create(Task::from_new(new_task)).unwrap()
        };

        let reopened = FileTaskRepository::open(path).unwrap();
        let tasks = reopened.list().unwrap();
        assert_eq!(tasks, vec![created]);
    }

    #[test]
    fn test_update_and_delete() {
        let dir = tempdir().unwrap();
        let repo = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let first = repo.create(Task::from_new(NewTask::new("first"))).unwrap();
        let second = repo.create(Task::from_new(NewTask::new("second"))).unwrap();

        let mut changed = first.clone();
        changed.apply(TaskPatch {
            is_done: Some(true),
            ..TaskPatch::default()
        });
        repo.update(&changed).unwrap();
        assert!(repo.get(&first.id).unwrap().is_done);

        repo.delete(&first.id).unwrap();
        let remaining: Vec<Uuid> = repo.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![second.id]);

        assert!(matches!(repo.delete(&first.id), Err(StoreError::NotFound(_))));
        assert!(matches!(repo.get(&first.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let repo = FileTaskRepository::open(path).unwrap();
        assert!(matches!(repo.list(), Err(StoreError::Storage(_))));
    }
}
