//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use oneonone::analytics::models::*;

/// Builder for a journey with biweekly meetings
pub struct JourneyBuilder {
    journey: Journey,
}

impl JourneyBuilder {
    pub fn new(collaborator: &str, manager: &str, year: i32) -> Self {
        let mut journey = Journey::new("acme", collaborator, manager, year);
        journey.id = format!("{collaborator}-{year}");
        Self { journey }
    }

    /// Append a meeting; `configure` fills in its survey
    pub fn meeting(mut self, configure: impl FnOnce(&mut Meeting)) -> Self {
        let number = self.journey.meetings.len() as u32 + 1;
        let start = Utc
            .with_ymd_and_hms(self.journey.year, 1, 8, 10, 0, 0)
            .unwrap();
        let mut meeting = Meeting::new(number, start + Duration::weeks(2 * (number as i64 - 1)));
        configure(&mut meeting);
        self.journey.meetings.push(meeting);
        self
    }

    pub fn build(self) -> Journey {
        self.journey
    }
}

pub fn pulse(meeting: &mut Meeting, values: &[f64]) {
    meeting.pulse_history = values
        .iter()
        .enumerate()
        .map(|(i, v)| PulseEntry::new(i as i64 + 1, *v))
        .collect();
}

pub fn development(meeting: &mut Meeting) -> &mut DevelopmentBlock {
    meeting.block_d.get_or_insert_with(Default::default)
}

pub fn operational(meeting: &mut Meeting) -> &mut OperationalBlock {
    meeting.block_a.get_or_insert_with(Default::default)
}

pub fn strategic(meeting: &mut Meeting) -> &mut StrategicBlock {
    meeting.block_b.get_or_insert_with(Default::default)
}

pub fn human(meeting: &mut Meeting) -> &mut HumanDynamicsBlock {
    meeting.block_c.get_or_insert_with(Default::default)
}

pub fn blockers(meeting: &mut Meeting, tags: &[&str]) {
    operational(meeting).blockers = Some(Blockers {
        level: Some(BlockerLevel::Yellow),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    });
}
