//! File-based storage backend: one JSON document per journey

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::analytics::models::Journey;
use crate::storage::{
    config::StorageConfig,
    error::{StorageError, StorageResult},
    traits::{check_unique, newest_first, HealthStatus, JourneyStore},
};

const JOURNEYS_DIR: &str = "journeys";

/// File-based journey store
pub struct FileBackend {
    base_dir: PathBuf,
    /// Serializes writers so the uniqueness check and the write are atomic
    write_lock: Arc<Mutex<()>>,
}

impl FileBackend {
    /// Create a new file backend
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        Self::at(config.resolved_base_dir()).await
    }

    /// Create a file backend rooted at `base_dir`
    pub async fn at(base_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(base_dir.join(JOURNEYS_DIR)).await?;

        Ok(Self {
            base_dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Document path for a (collaborator, year) pair.
    ///
    /// Identifiers are opaque, so the file name is a digest rather than the
    /// raw id.
    fn journey_path(&self, collaborator: &str, year: i32) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(collaborator.as_bytes());
        hasher.update([0u8]);
        hasher.update(year.to_le_bytes());
        let digest = hasher.finalize();
        let name: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.base_dir.join(JOURNEYS_DIR).join(format!("{name}.json"))
    }

    /// Read JSON file
    async fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> StorageResult<T> {
        let content = fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(StorageError::serialization)
    }

    /// Write JSON file via a temporary sibling and rename
    async fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(data)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(())
    }

    async fn read_optional(&self, path: &Path) -> StorageResult<Option<Journey>> {
        match self.read_json(path).await {
            Ok(journey) => Ok(Some(journey)),
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load every stored journey matching `keep`, skipping unreadable files
    async fn scan<F>(&self, keep: F) -> StorageResult<Vec<Journey>>
    where
        F: Fn(&Journey) -> bool,
    {
        let mut found = Vec::new();
        let mut entries = fs::read_dir(self.base_dir.join(JOURNEYS_DIR)).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_json::<Journey>(&path).await {
                Ok(journey) if keep(&journey) => found.push(journey),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable journey file {}: {}", path.display(), e),
            }
        }

        Ok(found)
    }
}

#[async_trait]
impl JourneyStore for FileBackend {
    async fn find_by_collaborator_year(
        &self,
        collaborator: &str,
        year: i32,
    ) -> StorageResult<Option<Journey>> {
        self.read_optional(&self.journey_path(collaborator, year))
            .await
    }

    async fn find_by_manager(&self, manager: &str) -> StorageResult<Vec<Journey>> {
        let mut found = self.scan(|j| j.manager == manager).await?;
        found.sort_by(|a, b| {
            a.collaborator
                .cmp(&b.collaborator)
                .then_with(|| a.year.cmp(&b.year))
        });
        Ok(found)
    }

    async fn find_recent_by_collaborator(
        &self,
        collaborator: &str,
        limit: usize,
    ) -> StorageResult<Vec<Journey>> {
        let found = self.scan(|j| j.collaborator == collaborator).await?;
        Ok(newest_first(found, limit))
    }

    async fn save(&self, journey: &Journey) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.journey_path(&journey.collaborator, journey.year);

        let existing = self.read_optional(&path).await?;
        check_unique(existing.as_ref(), journey)?;
        self.write_json(&path, journey).await?;

        debug!("Journey {} persisted to {}", journey.id, path.display());
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        let dir = self.base_dir.join(JOURNEYS_DIR);
        let mut journeys = 0;
        let healthy = match fs::read_dir(&dir).await {
            Ok(mut entries) => {
                while let Some(entry) = entries.next_entry().await? {
                    if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                        journeys += 1;
                    }
                }
                true
            }
            Err(e) => {
                warn!("Journey directory {} unavailable: {}", dir.display(), e);
                false
            }
        };

        Ok(HealthStatus {
            healthy,
            backend_type: "file".to_string(),
            journeys,
        })
    }
}
