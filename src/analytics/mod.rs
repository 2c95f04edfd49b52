//! Journey analytics
//!
//! Folds a year of 1:1 meeting surveys into annual reports, manager team
//! overviews and multi-year trends. Everything below the engine is pure
//! computation over in-memory journeys.

pub mod api_server;
pub mod classifiers;
pub mod distribution;
pub mod engine;
pub mod extractors;
pub mod insights;
pub mod lenient;
pub mod models;

pub use api_server::AnalyticsApiServer;
pub use classifiers::{FlowAnalysis, FlowState, Trajectory};
pub use distribution::{ActionItemsStats, RecognitionDistribution};
pub use engine::{AnalyticsEngine, AnnualInsights, AnnualReport, TeamOverviewRow, YearTrend};
pub use insights::{MeetingInsights, TimeField};
pub use models::*;
