//! Storage configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// JSON documents on disk (default)
    #[default]
    File,
    /// Process-local map, lost on exit
    Memory,
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

/// Main storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: BackendType,

    /// Base directory for the file backend (default: ~/.oneonone)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            backend: BackendType::Memory,
            base_dir: None,
        }
    }

    pub fn file(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendType::File,
            base_dir: Some(base_dir.into()),
        }
    }

    /// Resolved base directory for file storage
    pub fn resolved_base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(default_base_dir)
    }
}

pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".oneonone"))
        .unwrap_or_else(|| PathBuf::from(".oneonone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_default() {
        assert_eq!(BackendType::default(), BackendType::File);
    }

    #[test]
    fn test_backend_type_serialization() {
        let json = serde_json::to_string(&BackendType::Memory).unwrap();
        assert_eq!(json, r#""memory""#);
        let backend: BackendType = serde_json::from_str(r#""file""#).unwrap();
        assert_eq!(backend, BackendType::File);
    }

    #[test]
    fn test_backend_type_from_str() {
        assert_eq!("MEMORY".parse::<BackendType>(), Ok(BackendType::Memory));
        assert!("redis".parse::<BackendType>().is_err());
    }

    #[test]
    fn test_explicit_base_dir_wins() {
        let config = StorageConfig::file("/srv/oneonone");
        assert_eq!(config.resolved_base_dir(), PathBuf::from("/srv/oneonone"));
        assert!(StorageConfig::default()
            .resolved_base_dir()
            .ends_with(".oneonone"));
    }
}
