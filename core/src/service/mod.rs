pub mod dto;
pub mod task_service;
