//! Analytics engine for 1:1 meeting journeys
//!
//! Report assembly is pure: the engine performs one read through the
//! [`JourneyStore`] and then folds the journey data in memory. Averages that
//! have no underlying data are reported as 0.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::classifiers::{self, FlowAnalysis, Trajectory};
use super::distribution::{self, ActionItemsStats, RecognitionDistribution};
use super::extractors::{self as ex, or_zero};
use super::insights::MeetingInsights;
use super::models::{Journey, Meeting};
use crate::error::Result;
use crate::storage::JourneyStore;

/// Number of years included in a trends report
pub const TREND_YEARS: usize = 3;

/// Analytics engine over a journey store
#[derive(Clone)]
pub struct AnalyticsEngine {
    store: Arc<dyn JourneyStore>,
}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new(store: Arc<dyn JourneyStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn JourneyStore> {
        &self.store
    }

    /// Annual report for one collaborator; an unknown pair yields an empty report
    pub async fn annual_report(&self, collaborator: &str, year: i32) -> Result<AnnualReport> {
        let journey = self
            .store
            .find_by_collaborator_year(collaborator, year)
            .await?;

        let report = AnnualReport::build(collaborator, year, journey.as_ref());
        debug!(
            "Annual report for {} / {}: {} meetings",
            collaborator, year, report.total_meetings
        );
        Ok(report)
    }

    /// One row per journey managed by `manager`
    pub async fn team_overview(&self, manager: &str) -> Result<Vec<TeamOverviewRow>> {
        let journeys = self.store.find_by_manager(manager).await?;
        let rows: Vec<TeamOverviewRow> = journeys
            .iter()
            .map(TeamOverviewRow::from_journey)
            .collect();

        info!("Team overview for {}: {} journeys", manager, rows.len());
        Ok(rows)
    }

    /// Summary of the collaborator's most recent years, newest first
    pub async fn trends(&self, collaborator: &str) -> Result<Vec<YearTrend>> {
        let journeys = self
            .store
            .find_recent_by_collaborator(collaborator, TREND_YEARS)
            .await?;

        Ok(journeys.iter().map(YearTrend::from_journey).collect())
    }

    /// Insights for a single meeting, if the journey and meeting exist
    pub async fn meeting_insights(
        &self,
        collaborator: &str,
        year: i32,
        meeting_number: u32,
    ) -> Result<Option<MeetingInsights>> {
        let journey = self
            .store
            .find_by_collaborator_year(collaborator, year)
            .await?;

        Ok(journey
            .as_ref()
            .and_then(|j| j.meeting(meeting_number))
            .map(MeetingInsights::from_meeting))
    }
}

/// Meeting reference listed in an annual report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub meeting_number: u32,
    pub date: DateTime<Utc>,
}

/// Yearly report for one collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualReport {
    pub collaborator: String,
    pub year: i32,
    pub total_meetings: usize,
    /// `None` when the journey is missing or has no meetings
    pub insights: Option<AnnualInsights>,
    #[serde(default)]
    pub meetings: Vec<MeetingSummary>,
}

impl AnnualReport {
    pub fn empty(collaborator: &str, year: i32) -> Self {
        Self {
            collaborator: collaborator.to_string(),
            year,
            total_meetings: 0,
            insights: None,
            meetings: Vec::new(),
        }
    }

    /// Assemble the report without touching storage
    pub fn build(collaborator: &str, year: i32, journey: Option<&Journey>) -> Self {
        let Some(journey) = journey.filter(|j| !j.meetings.is_empty()) else {
            return Self::empty(collaborator, year);
        };

        Self {
            collaborator: collaborator.to_string(),
            year,
            total_meetings: journey.meetings.len(),
            insights: Some(AnnualInsights::from_meetings(&journey.meetings)),
            meetings: journey
                .meetings
                .iter()
                .map(|m| MeetingSummary {
                    meeting_number: m.meeting_number,
                    date: m.date,
                })
                .collect(),
        }
    }
}

/// Mean score of each scalar survey question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAverages {
    pub tool_adequacy: f64,
    pub priority_clarity: f64,
    pub goal_connection: f64,
    pub autonomy: f64,
    pub psychological_safety: f64,
    pub collaboration_friction: f64,
    pub strengths_utilization: f64,
    pub mental_health: f64,
}

impl BlockAverages {
    pub fn from_meetings(meetings: &[Meeting]) -> Self {
        let avg = |metric: ex::Metric| or_zero(ex::average_of(meetings, metric));
        Self {
            tool_adequacy: avg(ex::tool_adequacy),
            priority_clarity: avg(ex::priority_clarity),
            goal_connection: avg(ex::goal_connection),
            autonomy: avg(ex::autonomy),
            psychological_safety: avg(ex::psychological_safety),
            collaboration_friction: avg(ex::collaboration_friction),
            strengths_utilization: avg(ex::strengths_utilization),
            mental_health: avg(ex::mental_health),
        }
    }
}

/// Computed statistics over a non-empty year of meetings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualInsights {
    pub average_pulse: f64,
    pub pulse_trajectory: Trajectory,
    pub block_averages: BlockAverages,
    pub common_blockers: Vec<String>,
    pub innovation_rate: f64,
    pub recognition_distribution: RecognitionDistribution,
    pub flow_analysis: FlowAnalysis,
    pub top_learning_areas: Vec<String>,
    pub action_items_stats: ActionItemsStats,
}

impl AnnualInsights {
    pub fn from_meetings(meetings: &[Meeting]) -> Self {
        Self {
            average_pulse: or_zero(ex::average_pulse(meetings)),
            pulse_trajectory: classifiers::pulse_trajectory(meetings),
            block_averages: BlockAverages::from_meetings(meetings),
            common_blockers: distribution::common_blockers(meetings),
            innovation_rate: distribution::innovation_rate(meetings),
            recognition_distribution: distribution::recognition_distribution(meetings),
            flow_analysis: classifiers::analyze_flow(meetings),
            top_learning_areas: distribution::top_learning_areas(meetings),
            action_items_stats: distribution::action_items_stats(meetings),
        }
    }
}

/// One journey as seen in a manager's team overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOverviewRow {
    pub collaborator: String,
    pub year: i32,
    pub total_meetings: usize,
    /// Date of the last stored meeting, in stored order
    pub last_meeting_date: Option<DateTime<Utc>>,
    pub average_pulse: f64,
    pub average_mental_health: f64,
}

impl TeamOverviewRow {
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            collaborator: journey.collaborator.clone(),
            year: journey.year,
            total_meetings: journey.meetings.len(),
            last_meeting_date: journey.meetings.last().map(|m| m.date),
            average_pulse: or_zero(ex::average_pulse(&journey.meetings)),
            average_mental_health: or_zero(ex::average_of(&journey.meetings, ex::mental_health)),
        }
    }
}

/// Per-year summary used for multi-year trends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTrend {
    pub year: i32,
    pub total_meetings: usize,
    pub average_pulse: f64,
    pub average_mental_health: f64,
    pub average_autonomy: f64,
}

impl YearTrend {
    pub fn from_journey(journey: &Journey) -> Self {
        let meetings = &journey.meetings;
        Self {
            year: journey.year,
            total_meetings: meetings.len(),
            average_pulse: or_zero(ex::average_pulse(meetings)),
            average_mental_health: or_zero(ex::average_of(meetings, ex::mental_health)),
            average_autonomy: or_zero(ex::average_of(meetings, ex::autonomy)),
        }
    }
}
