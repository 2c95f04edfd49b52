//! Data models for 1:1 meeting journeys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lenient;

/// One collaborator's meetings for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tenant: String,
    pub collaborator: String,
    pub manager: String,
    pub year: i32,
    /// Stored in meeting-number order; a meeting that fails to decode is dropped
    #[serde(default, deserialize_with = "lenient::list")]
    pub meetings: Vec<Meeting>,
}

impl Journey {
    pub fn new(
        tenant: impl Into<String>,
        collaborator: impl Into<String>,
        manager: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id: String::new(),
            tenant: tenant.into(),
            collaborator: collaborator.into(),
            manager: manager.into(),
            year,
            meetings: Vec::new(),
        }
    }

    pub fn meeting(&self, meeting_number: u32) -> Option<&Meeting> {
        self.meetings
            .iter()
            .find(|m| m.meeting_number == meeting_number)
    }
}

/// A single retrospective + planning survey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub meeting_number: u32,
    pub date: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub pulse_history: Vec<PulseEntry>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub block_a: Option<OperationalBlock>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub block_b: Option<StrategicBlock>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub block_c: Option<HumanDynamicsBlock>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub block_d: Option<DevelopmentBlock>,
}

impl Meeting {
    pub fn new(meeting_number: u32, date: DateTime<Utc>) -> Self {
        Self {
            meeting_number,
            date,
            action_items: Vec::new(),
            pulse_history: Vec::new(),
            block_a: None,
            block_b: None,
            block_c: None,
            block_d: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::label", skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
}

impl ActionItem {
    pub fn new(description: impl Into<String>, status: ActionStatus) -> Self {
        Self {
            description: Some(description.into()),
            status: Some(status),
        }
    }
}

/// Weekly self-reported pulse (1-5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseEntry {
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub week: Option<i64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl PulseEntry {
    pub fn new(week: i64, value: f64) -> Self {
        Self {
            week: Some(week),
            value: Some(value),
        }
    }
}

/// Block A: operational excellence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalBlock {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub time_distribution: Option<TimeDistribution>,
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub blockers: Option<Blockers>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub tool_adequacy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub priority_clarity: Option<f64>,
}

/// Share of working time (percent) spent per activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeDistribution {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub execution: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub meetings: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub resolution: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blockers {
    #[serde(default, deserialize_with = "lenient::label", skip_serializing_if = "Option::is_none")]
    pub level: Option<BlockerLevel>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tags: Vec<String>,
}

/// Block B: strategic alignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicBlock {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub goal_connection: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub autonomy: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::boolean",
        skip_serializing_if = "Option::is_none"
    )]
    pub innovation: Option<bool>,
}

/// Block C: human dynamics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanDynamicsBlock {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub psychological_safety: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub collaboration_friction: Option<f64>,
    #[serde(default, deserialize_with = "lenient::label", skip_serializing_if = "Option::is_none")]
    pub recognition: Option<Recognition>,
}

/// Block D: development and wellbeing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentBlock {
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "Option::is_none")]
    pub intellectual_challenge: Option<IntellectualChallenge>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub strengths_utilization: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub active_learning: Vec<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub mental_health: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub biweekly_focus: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntellectualChallenge {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub skill: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub challenge: Option<f64>,
}

/// Unrecognised label in a stored survey
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown label '{}'", self.0)
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! survey_label {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownLabel(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

survey_label!(
    /// Lifecycle of an action item agreed in a meeting
    ActionStatus {
        Done => "done",
        Pending => "pending",
        Blocked => "blocked",
    }
);

survey_label!(
    /// Traffic-light severity of reported blockers
    BlockerLevel {
        Green => "green",
        Yellow => "yellow",
        Red => "red",
    }
);

survey_label!(
    /// Perceived recognition over the period
    Recognition {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);
