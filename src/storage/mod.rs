//! Journey persistence
//!
//! The analytics engine reads journeys through the [`JourneyStore`] trait.
//! Two backends are provided: JSON files under `~/.oneonone/journeys` and an
//! in-memory map for tests and throwaway servers.

pub mod backends;
pub mod config;
pub mod error;
pub mod traits;

pub use backends::{FileBackend, MemoryBackend};
pub use config::{BackendType, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use traits::{HealthStatus, JourneyStore};

use std::sync::Arc;
use tracing::info;

/// Create a store from explicit configuration
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn JourneyStore>> {
    match config.backend {
        BackendType::File => {
            let backend = FileBackend::new(config).await?;
            info!("Using file storage at {}", backend.base_dir().display());
            Ok(Arc::new(backend))
        }
        BackendType::Memory => {
            info!("Using in-memory storage; journeys will not survive restart");
            Ok(Arc::new(MemoryBackend::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_creates_file_backend() {
        let temp_dir = TempDir::new().unwrap();
        let store = from_config(&StorageConfig::file(temp_dir.path()))
            .await
            .unwrap();
        let health = store.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.backend_type, "file");
    }

    #[tokio::test]
    async fn test_creates_memory_backend() {
        let store = from_config(&StorageConfig::memory()).await.unwrap();
        let health = store.health_check().await.unwrap();
        assert_eq!(health.backend_type, "memory");
        assert_eq!(health.journeys, 0);
    }
}
