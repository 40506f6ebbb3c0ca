pub mod file;
pub mod location;
pub mod memory;
pub mod traits;

// Re-export
pub use file::FileTaskRepository;
pub use location::{SharedRepository, StoreLocation};
pub use memory::InMemoryTaskRepository;
pub use traits::TaskRepository;
