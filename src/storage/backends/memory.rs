//! In-memory storage backend for tests and ephemeral servers

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::analytics::models::Journey;
use crate::storage::{
    error::StorageResult,
    traits::{check_unique, newest_first, HealthStatus, JourneyStore},
};

type JourneyKey = (String, i32);

/// In-memory journey store keyed by (collaborator, year)
#[derive(Clone, Default)]
pub struct MemoryBackend {
    journeys: Arc<RwLock<HashMap<JourneyKey, Journey>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with journeys
    pub async fn with_journeys(journeys: impl IntoIterator<Item = Journey>) -> StorageResult<Self> {
        let backend = Self::new();
        for journey in journeys {
            backend.save(&journey).await?;
        }
        Ok(backend)
    }
}

#[async_trait]
impl JourneyStore for MemoryBackend {
    async fn find_by_collaborator_year(
        &self,
        collaborator: &str,
        year: i32,
    ) -> StorageResult<Option<Journey>> {
        let journeys = self.journeys.read().await;
        Ok(journeys.get(&(collaborator.to_string(), year)).cloned())
    }

    async fn find_by_manager(&self, manager: &str) -> StorageResult<Vec<Journey>> {
        let journeys = self.journeys.read().await;
        let mut found: Vec<Journey> = journeys
            .values()
            .filter(|j| j.manager == manager)
            .cloned()
            .collect();
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
        let journeys = self.journeys.read().await;
        let found = journeys
            .values()
            .filter(|j| j.collaborator == collaborator)
            .cloned()
            .collect();
        Ok(newest_first(found, limit))
    }

    async fn save(&self, journey: &Journey) -> StorageResult<()> {
        let key = (journey.collaborator.clone(), journey.year);
        let mut journeys = self.journeys.write().await;
        check_unique(journeys.get(&key), journey)?;
        journeys.insert(key, journey.clone());
        debug!(
            "Stored journey {} ({} / {})",
            journey.id, journey.collaborator, journey.year
        );
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            backend_type: "memory".to_string(),
            journeys: self.journeys.read().await.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey(id: &str, collaborator: &str, manager: &str, year: i32) -> Journey {
        Journey {
            id: id.to_string(),
            ..Journey::new("acme", collaborator, manager, year)
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = MemoryBackend::new();
        store.save(&journey("j1", "ana", "bob", 2024)).await.unwrap();

        let found = store.find_by_collaborator_year("ana", 2024).await.unwrap();
        assert_eq!(found.unwrap().id, "j1");
        assert!(store
            .find_by_collaborator_year("ana", 2023)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_second_journey_for_same_year_conflicts() {
        let store = MemoryBackend::new();
        store.save(&journey("j1", "ana", "bob", 2024)).await.unwrap();

        let err = store
            .save(&journey("j2", "ana", "bob", 2024))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // Re-saving the same journey is an update
        store.save(&journey("j1", "ana", "carl", 2024)).await.unwrap();
        let updated = store.find_by_collaborator_year("ana", 2024).await.unwrap();
        assert_eq!(updated.unwrap().manager, "carl");
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let store = MemoryBackend::with_journeys(
            (2019..=2024).map(|y| journey(&format!("j{y}"), "ana", "bob", y)),
        )
        .await
        .unwrap();

        let recent = store.find_recent_by_collaborator("ana", 3).await.unwrap();
        let years: Vec<i32> = recent.iter().map(|j| j.year).collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
    }

    #[tokio::test]
    async fn test_find_by_manager() {
        let store = MemoryBackend::with_journeys(vec![
            journey("j1", "ana", "bob", 2023),
            journey("j2", "ana", "bob", 2024),
            journey("j3", "cy", "dee", 2024),
        ])
        .await
        .unwrap();

        let team = store.find_by_manager("bob").await.unwrap();
        assert_eq!(team.len(), 2);
        assert!(store.find_by_manager("nobody").await.unwrap().is_empty());

        let health = store.health_check().await.unwrap();
        assert!(health.healthy);
        assert_eq!(health.journeys, 3);
    }
}
