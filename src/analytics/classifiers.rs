//! Trajectory and flow-state classification

use serde::{Deserialize, Serialize};

use super::extractors::{self, or_zero};
use super::models::Meeting;

/// Gap between half-series averages below which a trend is noise
pub const TREND_THRESHOLD: f64 = 0.5;

/// Direction of pulse over the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trajectory {
    Improving,
    Declining,
    Stable,
}

/// Classify a per-meeting series by comparing its early and late halves.
///
/// The split point is `len / 2`, so for odd lengths the middle element
/// belongs to the second half.
pub fn classify_series(series: &[f64]) -> Trajectory {
    if series.len() < 2 {
        return Trajectory::Stable;
    }

    let mid = series.len() / 2;
    let first = or_zero(extractors::mean(series[..mid].iter().copied()));
    let second = or_zero(extractors::mean(series[mid..].iter().copied()));

    if second > first + TREND_THRESHOLD {
        Trajectory::Improving
    } else if second < first - TREND_THRESHOLD {
        Trajectory::Declining
    } else {
        Trajectory::Stable
    }
}

/// Pulse trajectory of a journey's meetings in meeting-number order.
///
/// A meeting without pulse values contributes 0 to the series.
pub fn pulse_trajectory(meetings: &[Meeting]) -> Trajectory {
    let mut ordered: Vec<&Meeting> = meetings.iter().collect();
    ordered.sort_by_key(|m| m.meeting_number);

    let series: Vec<f64> = ordered
        .into_iter()
        .map(|m| or_zero(extractors::average_pulse(std::slice::from_ref(m))))
        .collect();

    classify_series(&series)
}

/// Skill-vs-challenge balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Flow,
    Anxiety,
    Boredom,
    Apathy,
    Unknown,
}

/// Absolute-threshold classifier used by annual analytics.
///
/// Checks run in order and the first match wins; mid-range pairs such as
/// (6, 6) fall through to `Unknown`.
pub fn classify_flow(skill: f64, challenge: f64) -> FlowState {
    if skill > 7.0 && challenge > 7.0 {
        FlowState::Flow
    } else if skill < 5.0 && challenge > 7.0 {
        FlowState::Anxiety
    } else if skill > 7.0 && challenge < 5.0 {
        FlowState::Boredom
    } else if skill < 5.0 && challenge < 5.0 {
        FlowState::Apathy
    } else {
        FlowState::Unknown
    }
}

/// Relative-gap classifier shown while a meeting form is being filled in.
///
/// Deliberately distinct from [`classify_flow`]: the two disagree on many
/// inputs (e.g. (6, 6) is `Flow` here and `Unknown` there) and must not be
/// merged without a product decision.
pub fn preview_flow_state(skill: f64, challenge: f64) -> FlowState {
    if challenge > skill + 2.0 {
        FlowState::Anxiety
    } else if skill > challenge + 2.0 {
        FlowState::Boredom
    } else if skill >= 6.0 && challenge >= 6.0 {
        FlowState::Flow
    } else {
        FlowState::Apathy
    }
}

/// Averaged skill/challenge with the resulting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAnalysis {
    pub average_skill: f64,
    pub average_challenge: f64,
    pub flow_state: FlowState,
}

/// Classify the mean skill and challenge over meetings recording both.
pub fn analyze_flow(meetings: &[Meeting]) -> FlowAnalysis {
    let pairs: Vec<(f64, f64)> = meetings
        .iter()
        .filter_map(extractors::skill_and_challenge)
        .collect();

    let (Some(skill), Some(challenge)) = (
        extractors::mean(pairs.iter().map(|(s, _)| *s)),
        extractors::mean(pairs.iter().map(|(_, c)| *c)),
    ) else {
        return FlowAnalysis {
            average_skill: 0.0,
            average_challenge: 0.0,
            flow_state: FlowState::Unknown,
        };
    };

    FlowAnalysis {
        average_skill: skill,
        average_challenge: challenge,
        flow_state: classify_flow(skill, challenge),
    }
}
