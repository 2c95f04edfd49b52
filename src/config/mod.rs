use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::{default_config_path, load_config};

use crate::storage::StorageConfig;

/// Service configuration, read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// `tracing` filter directive, e.g. `info` or `oneonone=debug`
    #[serde(default)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Apply `ONEONONE_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ONEONONE_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("ONEONONE_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid ONEONONE_PORT '{}'", port),
            }
        }

        if let Some(backend) = lookup("ONEONONE_STORAGE") {
            match backend.parse() {
                Ok(backend) => self.storage.backend = backend,
                Err(e) => tracing::warn!("Ignoring ONEONONE_STORAGE: {}", e),
            }
        }

        if let Some(dir) = lookup("ONEONONE_DATA_DIR") {
            self.storage.base_dir = Some(PathBuf::from(dir));
        }

        if let Some(filter) = lookup("ONEONONE_LOG") {
            self.log_filter = Some(filter);
        }
    }
}
