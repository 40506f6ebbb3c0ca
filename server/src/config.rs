//! Server configuration, read from the environment.
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: listen port (default `5000`)
//! - `DATABASE_URL`: task store location, `memory:` / `file://<path>` / a bare path
//!   (default `~/.taskboard/tasks.json`)

use std::env;

use taskboard_core::{StoreError, StoreLocation};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT='{0}' is not a valid port number")]
    InvalidPort(String),

    #[error("DATABASE_URL is invalid: {0}")]
    Database(StoreError),

    #[error("DATABASE_URL is not set and the default task file location is unavailable: {0}")]
    DefaultStore(StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match read("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let store = match read("DATABASE_URL") {
            Some(url) => StoreLocation::parse(&url).map_err(ConfigError::Database)?,
            None => StoreLocation::default_file().map_err(ConfigError::DefaultStore)?,
        };

        Ok(Self { host, port, store })
    }
}
