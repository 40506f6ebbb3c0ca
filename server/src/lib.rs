//! HTTP JSON API for the task board.

pub mod api;
pub mod config;

pub use api::{router, AppState};
pub use config::{ConfigError, ServerConfig};
