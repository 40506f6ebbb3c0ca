use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};
use crate::repository::file::{default_data_dir, FileTaskRepository, DEFAULT_FILE_NAME};
use crate::repository::memory::InMemoryTaskRepository;
use crate::repository::traits::TaskRepository;

pub type SharedRepository = Box<dyn TaskRepository + Send + Sync>;

/// Where task documents live, parsed from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// Accepts `memory:`, `memory://`, `file://<path>` or a bare filesystem path.
    pub fn parse(url: &str) -> StoreResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(StoreError::Storage("empty database location".to_string()));
        }
        if url == "memory:" || url == "memory://" {
            return Ok(StoreLocation::Memory);
        }
        if let Some(path) = url.strip_prefix("file://") {
            if path.is_empty() {
                return Err(StoreError::Storage("file:// location has no path".to_string()));
            }
            return Ok(StoreLocation::File(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = url.split_once("://") {
            return Err(StoreError::Storage(format!(
                "unsupported database scheme '{}'",
                scheme
            )));
        }
        Ok(StoreLocation::File(PathBuf::from(url)))
    }

    /// `~/.taskboard/tasks.json`
    pub fn default_file() -> StoreResult<Self> {
        Ok(StoreLocation::File(default_data_dir()?.join(DEFAULT_FILE_NAME)))
    }

    pub fn open(&self) -> StoreResult<SharedRepository> {
        match self {
            StoreLocation::Memory => Ok(Box::new(InMemoryTaskRepository::new())),
            StoreLocation::File(path) => Ok(Box::new(FileTaskRepository::open(path.clone())?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locations() {
        assert_eq!(StoreLocation::parse("memory:").unwrap(), StoreLocation::Memory);
        assert_eq!(StoreLocation::parse("memory://").unwrap(), StoreLocation::Memory);
        assert_eq!(
            StoreLocation::parse("file:///var/lib/taskboard/tasks.json").unwrap(),
            StoreLocation::File(PathBuf::from("/var/lib/taskboard/tasks.json"))
        );
        assert_eq!(
            StoreLocation::parse("data/tasks.json").unwrap(),
            StoreLocation::File(PathBuf::from("data/tasks.json"))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(StoreLocation::parse("mongodb://localhost:27017/tasks").is_err());
        assert!(StoreLocation::parse("file://").is_err());
        assert!(StoreLocation::parse("  ").is_err());
    }

    #[test]
    fn test_open_memory() {
        let repo = StoreLocation::Memory.open().unwrap();
        assert!(repo.list().unwrap().is_empty());
    }
}
