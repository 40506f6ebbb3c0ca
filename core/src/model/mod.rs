pub mod date;
pub mod task;
