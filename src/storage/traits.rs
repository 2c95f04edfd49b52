//! Persistence seam consumed by the analytics engine

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StorageResult;
use crate::analytics::models::Journey;

/// Journey persistence
///
/// Lookups return fully populated journeys; meetings are never lazy.
#[async_trait]
pub trait JourneyStore: Send + Sync {
    /// The single journey for a collaborator and year, if any
    async fn find_by_collaborator_year(
        &self,
        collaborator: &str,
        year: i32,
    ) -> StorageResult<Option<Journey>>;

    /// Every journey owned by a manager
    async fn find_by_manager(&self, manager: &str) -> StorageResult<Vec<Journey>>;

    /// A collaborator's journeys, newest year first, at most `limit`
    async fn find_recent_by_collaborator(
        &self,
        collaborator: &str,
        limit: usize,
    ) -> StorageResult<Vec<Journey>>;

    /// Insert or replace the journey for its (collaborator, year) pair
    async fn save(&self, journey: &Journey) -> StorageResult<()>;

    /// Check the health of the storage backend
    async fn health_check(&self) -> StorageResult<HealthStatus>;
}

/// Backend health snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub backend_type: String,
    pub journeys: usize,
}

/// Sort newest year first and truncate, as every backend must
pub(crate) fn newest_first(mut journeys: Vec<Journey>, limit: usize) -> Vec<Journey> {
    journeys.sort_by(|a, b| b.year.cmp(&a.year));
    journeys.truncate(limit);
    journeys
}

/// Reject a save that would create a second journey for the same pair
pub(crate) fn check_unique(existing: Option<&Journey>, incoming: &Journey) -> StorageResult<()> {
    match existing {
        Some(current) if current.id != incoming.id => Err(super::StorageError::conflict(format!(
            "journey {} already exists for collaborator {} in {}",
            current.id, incoming.collaborator, incoming.year
        ))),
        _ => Ok(()),
    }
}
