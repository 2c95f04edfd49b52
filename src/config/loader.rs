use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::AppConfig;

/// `~/.oneonone/config.toml`
pub fn default_config_path() -> PathBuf {
    crate::storage::config::default_base_dir().join("config.toml")
}

/// Load configuration from `path` (or the default location), then apply
/// environment overrides.
///
/// An explicit path must exist; the default location is optional.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match path {
        Some(path) => read_config(path).await?,
        None => {
            let default_path = default_config_path();
            if fs::try_exists(&default_path).await.unwrap_or(false) {
                read_config(&default_path).await?
            } else {
                debug!("No config file at {}, using defaults", default_path.display());
                AppConfig::default()
            }
        }
    };

    config.merge_env_vars();
    Ok(config)
}

async fn read_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendType;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_partial_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
log_filter = "oneonone=debug"

[server]
port = 3000

[storage]
backend = "memory"
"#,
        )
        .unwrap();

        let config = read_config(&path).await.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.backend, BackendType::Memory);
        assert_eq!(config.log_filter.as_deref(), Some("oneonone=debug"));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_config(&temp_dir.path().join("absent.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(read_config(&path).await.is_err());
    }
}
