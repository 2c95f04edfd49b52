//! Per-field metric accessors and averaging helpers
//!
//! Every accessor returns `None` when any level on the way to the field is
//! missing. Averages are `None` when no meeting carries the field; report
//! assembly decides how that is rendered.

use super::models::{IntellectualChallenge, Meeting};

/// Accessor for one numeric survey field
pub type Metric = fn(&Meeting) -> Option<f64>;

pub fn tool_adequacy(meeting: &Meeting) -> Option<f64> {
    meeting.block_a.as_ref()?.tool_adequacy
}

pub fn priority_clarity(meeting: &Meeting) -> Option<f64> {
    meeting.block_a.as_ref()?.priority_clarity
}

pub fn goal_connection(meeting: &Meeting) -> Option<f64> {
    meeting.block_b.as_ref()?.goal_connection
}

pub fn autonomy(meeting: &Meeting) -> Option<f64> {
    meeting.block_b.as_ref()?.autonomy
}

pub fn psychological_safety(meeting: &Meeting) -> Option<f64> {
    meeting.block_c.as_ref()?.psychological_safety
}

pub fn collaboration_friction(meeting: &Meeting) -> Option<f64> {
    meeting.block_c.as_ref()?.collaboration_friction
}

pub fn strengths_utilization(meeting: &Meeting) -> Option<f64> {
    meeting.block_d.as_ref()?.strengths_utilization
}

pub fn mental_health(meeting: &Meeting) -> Option<f64> {
    meeting.block_d.as_ref()?.mental_health
}

pub fn intellectual_challenge(meeting: &Meeting) -> Option<&IntellectualChallenge> {
    meeting.block_d.as_ref()?.intellectual_challenge.as_ref()
}

/// Skill and challenge, only when both are recorded
pub fn skill_and_challenge(meeting: &Meeting) -> Option<(f64, f64)> {
    let ic = intellectual_challenge(meeting)?;
    Some((ic.skill?, ic.challenge?))
}

pub fn innovation(meeting: &Meeting) -> Option<bool> {
    meeting.block_b.as_ref()?.innovation
}

pub fn blocker_tags(meeting: &Meeting) -> &[String] {
    meeting
        .block_a
        .as_ref()
        .and_then(|a| a.blockers.as_ref())
        .map(|b| b.tags.as_slice())
        .unwrap_or_default()
}

pub fn active_learning(meeting: &Meeting) -> &[String] {
    meeting
        .block_d
        .as_ref()
        .map(|d| d.active_learning.as_slice())
        .unwrap_or_default()
}

/// Arithmetic mean; `None` for an empty input
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Mean of one metric over the meetings that record it
pub fn average_of(meetings: &[Meeting], metric: Metric) -> Option<f64> {
    mean(meetings.iter().filter_map(metric))
}

/// Mean of every defined pulse value across the meetings
pub fn average_pulse(meetings: &[Meeting]) -> Option<f64> {
    mean(
        meetings
            .iter()
            .flat_map(|m| m.pulse_history.iter())
            .filter_map(|p| p.value),
    )
}

/// Renders an absent average as 0 for report payloads
pub fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::models::*;
    use chrono::{TimeZone, Utc};

    fn meeting(number: u32) -> Meeting {
        Meeting::new(number, Utc.with_ymd_and_hms(2024, 1, number, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_average_is_none_without_values() {
        let meetings = vec![meeting(1), meeting(2)];
        assert_eq!(average_of(&meetings, mental_health), None);
        assert_eq!(or_zero(average_of(&meetings, mental_health)), 0.0);
        assert_eq!(average_pulse(&meetings), None);
        assert_eq!(average_pulse(&[]), None);
    }

    #[test]
    fn test_average_skips_meetings_missing_the_field() {
        let mut first = meeting(1);
        first.block_d = Some(DevelopmentBlock {
            mental_health: Some(4.0),
            ..Default::default()
        });
        let mut second = meeting(2);
        // Block present but field absent
        second.block_d = Some(DevelopmentBlock::default());
        let mut third = meeting(3);
        third.block_d = Some(DevelopmentBlock {
            mental_health: Some(2.0),
            ..Default::default()
        });

        let meetings = vec![first, second, third, meeting(4)];
        assert_eq!(average_of(&meetings, mental_health), Some(3.0));
    }

    #[test]
    fn test_average_pulse_flattens_history_and_drops_undefined() {
        let mut first = meeting(1);
        first.pulse_history = vec![PulseEntry::new(1, 5.0), PulseEntry::new(2, 3.0)];
        let mut second = meeting(2);
        second.pulse_history = vec![
            PulseEntry {
                week: Some(3),
                value: None,
            },
            PulseEntry::new(4, 1.0),
        ];

        assert_eq!(average_pulse(&[first, second]), Some(3.0));
    }

    #[test]
    fn test_skill_and_challenge_requires_both() {
        let mut only_skill = meeting(1);
        only_skill.block_d = Some(DevelopmentBlock {
            intellectual_challenge: Some(IntellectualChallenge {
                skill: Some(8.0),
                challenge: None,
            }),
            ..Default::default()
        });
        assert_eq!(skill_and_challenge(&only_skill), None);

        let mut both = meeting(2);
        both.block_d = Some(DevelopmentBlock {
            intellectual_challenge: Some(IntellectualChallenge {
                skill: Some(8.0),
                challenge: Some(6.0),
            }),
            ..Default::default()
        });
        assert_eq!(skill_and_challenge(&both), Some((8.0, 6.0)));
    }

    #[test]
    fn test_out_of_range_values_are_averaged_as_given() {
        let mut first = meeting(1);
        first.block_a = Some(OperationalBlock {
            tool_adequacy: Some(9.0),
            ..Default::default()
        });
        let mut second = meeting(2);
        second.block_a = Some(OperationalBlock {
            tool_adequacy: Some(-1.0),
            ..Default::default()
        });
        assert_eq!(average_of(&[first, second], tool_adequacy), Some(4.0));
    }

    #[test]
    fn test_list_accessors_tolerate_missing_blocks() {
        let empty = meeting(1);
        assert!(blocker_tags(&empty).is_empty());
        assert!(active_learning(&empty).is_empty());
    }
}
