//! Load journeys from JSON exports into a store

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::models::Journey;
use crate::error::{Error, Result};
use crate::storage::JourneyStore;

#[derive(Deserialize)]
#[serde(untagged)]
enum JourneyDocument {
    Many(Vec<Journey>),
    One(Box<Journey>),
}

/// Parse a document holding one journey or an array of journeys.
///
/// Journeys without an id receive a fresh UUID and meetings are put in
/// meeting-number order.
pub fn parse_journeys(content: &str) -> Result<Vec<Journey>> {
    let journeys = match serde_json::from_str::<JourneyDocument>(content)? {
        JourneyDocument::Many(journeys) => journeys,
        JourneyDocument::One(journey) => vec![*journey],
    };

    journeys.into_iter().map(normalize).collect()
}

fn normalize(mut journey: Journey) -> Result<Journey> {
    if journey.id.is_empty() {
        journey.id = Uuid::new_v4().to_string();
    }

    let mut seen = HashSet::new();
    for meeting in &journey.meetings {
        if meeting.meeting_number == 0 {
            return Err(Error::Validation(format!(
                "journey {}: meeting numbers start at 1",
                journey.id
            )));
        }
        if !seen.insert(meeting.meeting_number) {
            return Err(Error::Validation(format!(
                "journey {}: duplicate meeting number {}",
                journey.id, meeting.meeting_number
            )));
        }
    }
    journey.meetings.sort_by_key(|m| m.meeting_number);

    Ok(journey)
}

/// Import every journey in `path`, returning how many were saved
pub async fn import_file(store: &dyn JourneyStore, path: &Path) -> Result<usize> {
    let content = tokio::fs::read_to_string(path).await?;
    let journeys = parse_journeys(&content)?;

    let mut saved = 0;
    for journey in &journeys {
        match store.save(journey).await {
            Ok(()) => saved += 1,
            Err(e) if e.is_conflict() => {
                warn!("Skipping journey {}: {}", journey.id, e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        "Imported {} of {} journeys from {}",
        saved,
        journeys.len(),
        path.display()
    );
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use tempfile::TempDir;

    const SINGLE: &str = r#"{
        "collaborator": "ana", "manager": "bob", "year": 2024,
        "meetings": [
            {"meetingNumber": 2, "date": "2024-02-01T09:00:00Z"},
            {"meetingNumber": 1, "date": "2024-01-15T09:00:00Z"}
        ]
    }"#;

    #[test]
    fn test_single_document_gets_id_and_sorted_meetings() {
        let journeys = parse_journeys(SINGLE).unwrap();
        assert_eq!(journeys.len(), 1);
        assert!(Uuid::parse_str(&journeys[0].id).is_ok());
        let numbers: Vec<u32> = journeys[0].meetings.iter().map(|m| m.meeting_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_array_document_keeps_existing_ids() {
        let journeys = parse_journeys(
            r#"[{"id": "j1", "collaborator": "ana", "manager": "bob", "year": 2023},
                {"id": "j2", "collaborator": "ana", "manager": "bob", "year": 2024}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = journeys.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "j2"]);
    }

    #[test]
    fn test_duplicate_meeting_numbers_rejected() {
        let err = parse_journeys(
            r#"{"collaborator": "ana", "manager": "bob", "year": 2024, "meetings": [
                {"meetingNumber": 1, "date": "2024-01-15T09:00:00Z"},
                {"meetingNumber": 1, "date": "2024-01-29T09:00:00Z"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_import_file_saves_and_skips_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"[{"id": "j1", "collaborator": "ana", "manager": "bob", "year": 2024},
                {"id": "j2", "collaborator": "ana", "manager": "bob", "year": 2024},
                {"id": "j3", "collaborator": "cy", "manager": "bob", "year": 2024}]"#,
        )
        .unwrap();

        let store = MemoryBackend::new();
        let saved = import_file(&store, &path).await.unwrap();
        assert_eq!(saved, 2);
        let stored = store.find_by_collaborator_year("ana", 2024).await.unwrap();
        assert_eq!(stored.unwrap().id, "j1");
    }
}
