//! Frequency counters over categorical survey fields

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::extractors;
use super::models::{ActionItem, ActionStatus, Meeting, Recognition};

/// Number of labels kept by the tag rankings
pub const TOP_TAGS: usize = 5;

/// Most frequent non-empty labels, highest count first.
///
/// Ties keep the order in which labels were first seen.
pub fn top_labels<'a, I>(labels: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for label in labels.into_iter().filter(|l| !l.is_empty()) {
        match positions.get(label.as_str()) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(label.as_str(), counts.len());
                counts.push((label.as_str(), 1));
            }
        }
    }

    // Stable sort preserves first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(label, _)| label.to_string())
        .collect()
}

pub fn common_blockers(meetings: &[Meeting]) -> Vec<String> {
    top_labels(
        meetings.iter().flat_map(|m| extractors::blocker_tags(m).iter()),
        TOP_TAGS,
    )
}

pub fn top_learning_areas(meetings: &[Meeting]) -> Vec<String> {
    top_labels(
        meetings.iter().flat_map(|m| extractors::active_learning(m).iter()),
        TOP_TAGS,
    )
}

/// Count of meetings per recognition level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionDistribution {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl RecognitionDistribution {
    pub fn record(&mut self, recognition: Recognition) {
        match recognition {
            Recognition::Low => self.low += 1,
            Recognition::Medium => self.medium += 1,
            Recognition::High => self.high += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }
}

pub fn recognition_distribution(meetings: &[Meeting]) -> RecognitionDistribution {
    meetings
        .iter()
        .filter_map(|m| m.block_c.as_ref()?.recognition)
        .fold(RecognitionDistribution::default(), |mut dist, r| {
            dist.record(r);
            dist
        })
}

/// Percentage of all meetings that reported an innovation
pub fn innovation_rate(meetings: &[Meeting]) -> f64 {
    if meetings.is_empty() {
        return 0.0;
    }
    let innovative = meetings
        .iter()
        .filter(|m| extractors::innovation(m) == Some(true))
        .count();
    innovative as f64 / meetings.len() as f64 * 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemsStats {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
    pub blocked: usize,
    pub completion_rate: f64,
}

impl ActionItemsStats {
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a ActionItem>,
    {
        let mut stats = Self::default();
        for item in items {
            stats.total += 1;
            match item.status {
                Some(ActionStatus::Done) => stats.done += 1,
                Some(ActionStatus::Pending) => stats.pending += 1,
                Some(ActionStatus::Blocked) => stats.blocked += 1,
                None => {}
            }
        }
        if stats.total > 0 {
            stats.completion_rate = stats.done as f64 / stats.total as f64 * 100.0;
        }
        stats
    }
}

pub fn action_items_stats(meetings: &[Meeting]) -> ActionItemsStats {
    ActionItemsStats::from_items(meetings.iter().flat_map(|m| m.action_items.iter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::models::*;
    use chrono::{TimeZone, Utc};

    fn meeting(number: u32) -> Meeting {
        Meeting::new(number, Utc.with_ymd_and_hms(2024, 4, number, 9, 0, 0).unwrap())
    }

    fn with_tags(number: u32, tags: &[&str]) -> Meeting {
        let mut m = meeting(number);
        m.block_a = Some(OperationalBlock {
            blockers: Some(Blockers {
                level: Some(BlockerLevel::Red),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            }),
            ..Default::default()
        });
        m
    }

    fn with_recognition(number: u32, recognition: Option<Recognition>) -> Meeting {
        let mut m = meeting(number);
        m.block_c = Some(HumanDynamicsBlock {
            recognition,
            ..Default::default()
        });
        m
    }

    #[test]
    fn test_common_blockers_ranked_and_limited() {
        let meetings = vec![
            with_tags(1, &["ci", "deps", "a", "b"]),
            with_tags(2, &["ci", "deps", "c", "d", ""]),
            with_tags(3, &["ci", "e", "", ""]),
            meeting(4),
        ];
        let top = common_blockers(&meetings);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], "ci");
        assert_eq!(top[1], "deps");
        assert!(!top.contains(&String::new()));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let meetings = vec![with_tags(1, &["zeta", "alpha"]), with_tags(2, &["alpha", "zeta"])];
        assert_eq!(common_blockers(&meetings), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_top_learning_areas() {
        let mut m = meeting(1);
        m.block_d = Some(DevelopmentBlock {
            active_learning: vec!["rust".into(), "sql".into(), "rust".into()],
            ..Default::default()
        });
        assert_eq!(top_learning_areas(&[m]), vec!["rust", "sql"]);
        assert!(top_learning_areas(&[]).is_empty());
    }

    #[test]
    fn test_recognition_distribution() {
        let meetings = vec![
            with_recognition(1, Some(Recognition::Low)),
            with_recognition(2, Some(Recognition::High)),
            with_recognition(3, Some(Recognition::High)),
            with_recognition(4, Some(Recognition::Medium)),
            with_recognition(5, None),
            meeting(6),
        ];
        let dist = recognition_distribution(&meetings);
        assert_eq!(
            dist,
            RecognitionDistribution {
                low: 1,
                medium: 1,
                high: 2
            }
        );
        assert!(dist.total() as usize <= meetings.len());
    }

    #[test]
    fn test_innovation_rate_over_all_meetings() {
        let mut innovative = meeting(1);
        innovative.block_b = Some(StrategicBlock {
            innovation: Some(true),
            ..Default::default()
        });
        let mut not_innovative = meeting(2);
        not_innovative.block_b = Some(StrategicBlock {
            innovation: Some(false),
            ..Default::default()
        });
        let meetings = vec![innovative, not_innovative, meeting(3), meeting(4)];
        assert_eq!(innovation_rate(&meetings), 25.0);
        assert_eq!(innovation_rate(&[]), 0.0);
    }

    #[test]
    fn test_action_items_stats() {
        let mut m = meeting(1);
        m.action_items = vec![
            ActionItem::new("a", ActionStatus::Done),
            ActionItem::new("b", ActionStatus::Done),
            ActionItem::new("c", ActionStatus::Pending),
        ];
        let mut n = meeting(2);
        n.action_items = vec![ActionItem::new("d", ActionStatus::Blocked)];

        let stats = action_items_stats(&[m, n]);
        assert_eq!(
            stats,
            ActionItemsStats {
                total: 4,
                done: 2,
                pending: 1,
                blocked: 1,
                completion_rate: 50.0,
            }
        );
    }

    #[test]
    fn test_action_items_without_status_count_toward_total_only() {
        let mut m = meeting(1);
        m.action_items = vec![
            ActionItem::new("a", ActionStatus::Done),
            ActionItem {
                description: Some("b".into()),
                status: None,
            },
        ];
        let stats = action_items_stats(&[m]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(action_items_stats(&[]).completion_rate, 0.0);
    }
}
