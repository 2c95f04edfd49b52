//! Per-meeting computed insights and time-distribution editing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifiers::{preview_flow_state, FlowState};
use super::distribution::ActionItemsStats;
use super::extractors::{self, or_zero};
use super::models::{ActionStatus, BlockerLevel, Meeting, TimeDistribution};

/// Summary of one meeting, as shown next to the meeting form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInsights {
    pub meeting_number: u32,
    pub date: DateTime<Utc>,
    pub average_pulse: f64,
    pub pulse_weeks: usize,
    pub flow_preview: Option<FlowState>,
    pub blocker_level: Option<BlockerLevel>,
    pub blocker_tags: Vec<String>,
    pub action_items_stats: ActionItemsStats,
    pub pending_action_items: Vec<String>,
    pub time_distribution_total: Option<f64>,
}

impl MeetingInsights {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        let single = std::slice::from_ref(meeting);
        let blockers = meeting.block_a.as_ref().and_then(|a| a.blockers.as_ref());

        Self {
            meeting_number: meeting.meeting_number,
            date: meeting.date,
            average_pulse: or_zero(extractors::average_pulse(single)),
            pulse_weeks: meeting
                .pulse_history
                .iter()
                .filter(|p| p.value.is_some())
                .count(),
            flow_preview: extractors::skill_and_challenge(meeting)
                .map(|(skill, challenge)| preview_flow_state(skill, challenge)),
            blocker_level: blockers.and_then(|b| b.level),
            blocker_tags: extractors::blocker_tags(meeting)
                .iter()
                .filter(|t| !t.is_empty())
                .cloned()
                .collect(),
            action_items_stats: ActionItemsStats::from_items(&meeting.action_items),
            pending_action_items: meeting
                .action_items
                .iter()
                .filter(|item| item.status != Some(ActionStatus::Done))
                .filter_map(|item| item.description.clone())
                .collect(),
            time_distribution_total: meeting
                .block_a
                .as_ref()
                .and_then(|a| a.time_distribution.as_ref())
                .map(TimeDistribution::total),
        }
    }
}

/// One slider of the time-distribution control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Execution,
    Meetings,
    Resolution,
}

impl TimeDistribution {
    pub fn new(execution: f64, meetings: f64, resolution: f64) -> Self {
        Self {
            execution: Some(execution),
            meetings: Some(meetings),
            resolution: Some(resolution),
        }
    }

    pub fn get(&self, field: TimeField) -> Option<f64> {
        match field {
            TimeField::Execution => self.execution,
            TimeField::Meetings => self.meetings,
            TimeField::Resolution => self.resolution,
        }
    }

    fn set(&mut self, field: TimeField, value: f64) {
        let slot = match field {
            TimeField::Execution => &mut self.execution,
            TimeField::Meetings => &mut self.meetings,
            TimeField::Resolution => &mut self.resolution,
        };
        *slot = Some(value);
    }

    /// Sum of the recorded parts
    pub fn total(&self) -> f64 {
        [self.execution, self.meetings, self.resolution]
            .into_iter()
            .flatten()
            .sum()
    }

    /// Move one slider and rebalance the other two so the parts sum to 100.
    ///
    /// The remainder is split in proportion to the other two parts (evenly
    /// when both are zero). Results are whole percentages; the last field
    /// absorbs rounding.
    pub fn rebalance(&self, field: TimeField, value: f64) -> TimeDistribution {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0).round()
        } else {
            0.0
        };
        let remainder = 100.0 - value;

        let others: Vec<TimeField> = [
            TimeField::Execution,
            TimeField::Meetings,
            TimeField::Resolution,
        ]
        .into_iter()
        .filter(|f| *f != field)
        .collect();
        let (first, last) = (others[0], others[1]);
        let current_first = self.get(first).unwrap_or(0.0).max(0.0);
        let current_last = self.get(last).unwrap_or(0.0).max(0.0);
        let current_sum = current_first + current_last;

        let first_share = if current_sum > 0.0 {
            (remainder * current_first / current_sum).round()
        } else {
            (remainder / 2.0).round()
        };

        let mut rebalanced = TimeDistribution::default();
        rebalanced.set(field, value);
        rebalanced.set(first, first_share);
        rebalanced.set(last, remainder - first_share);
        rebalanced
    }
}
