//! REST API server for analytics endpoints

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::{
    engine::{AnalyticsEngine, AnnualReport, TeamOverviewRow, YearTrend},
    insights::{MeetingInsights, TimeField},
    models::TimeDistribution,
};
use crate::config::ServerConfig;
use crate::error::Error;
use crate::storage::HealthStatus;

/// API server for analytics endpoints
pub struct AnalyticsApiServer {
    engine: AnalyticsEngine,
    config: ServerConfig,
}

impl AnalyticsApiServer {
    /// Create new API server
    pub fn new(engine: AnalyticsEngine, config: ServerConfig) -> Self {
        Self { engine, config }
    }

    /// Start the API server and run until Ctrl-C
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let app = build_router(self.engine, self.config.enable_cors);

        info!("Starting analytics API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Analytics API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Build API router
pub fn build_router(engine: AnalyticsEngine, enable_cors: bool) -> Router {
    let shared_state = Arc::new(ApiState { engine });

    let router = Router::new()
        .route("/api/v1/health", get(health_check))
        .route(
            "/api/v1/analytics/collaborators/{collaborator}/years/{year}/report",
            get(get_annual_report),
        )
        .route(
            "/api/v1/analytics/collaborators/{collaborator}/years/{year}/meetings/{meeting_number}/insights",
            get(get_meeting_insights),
        )
        .route(
            "/api/v1/analytics/collaborators/{collaborator}/trends",
            get(get_trends),
        )
        .route(
            "/api/v1/analytics/managers/{manager}/team",
            get(get_team_overview),
        )
        .route(
            "/api/v1/time-distribution/rebalance",
            post(rebalance_time_distribution),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Shared API state
struct ApiState {
    engine: AnalyticsEngine,
}

/// API response wrapper for health and error bodies
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Error returned by handlers
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!("Analytics request failed: {}", self.message);
        }
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

// API Handlers

async fn health_check(
    State(state): State<Arc<ApiState>>,
) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    match state.engine.store().health_check().await {
        Ok(health) if health.healthy => (StatusCode::OK, Json(ApiResponse::success(health))),
        Ok(health) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::success(health)),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::error(format!("Storage unavailable: {e}"))),
        ),
    }
}

async fn get_annual_report(
    State(state): State<Arc<ApiState>>,
    Path((collaborator, year)): Path<(String, i32)>,
) -> ApiResult<AnnualReport> {
    Ok(Json(state.engine.annual_report(&collaborator, year).await?))
}

async fn get_meeting_insights(
    State(state): State<Arc<ApiState>>,
    Path((collaborator, year, meeting_number)): Path<(String, i32, u32)>,
) -> ApiResult<MeetingInsights> {
    state
        .engine
        .meeting_insights(&collaborator, year, meeting_number)
        .await?
        .map(Json)
        .ok_or_else(|| {
            Error::NotFound(format!(
                "meeting {meeting_number} for {collaborator} in {year}"
            ))
            .into()
        })
}

async fn get_trends(
    State(state): State<Arc<ApiState>>,
    Path(collaborator): Path<String>,
) -> ApiResult<Vec<YearTrend>> {
    Ok(Json(state.engine.trends(&collaborator).await?))
}

async fn get_team_overview(
    State(state): State<Arc<ApiState>>,
    Path(manager): Path<String>,
) -> ApiResult<Vec<TeamOverviewRow>> {
    Ok(Json(state.engine.team_overview(&manager).await?))
}

/// Slider move in the meeting form
#[derive(Debug, Deserialize)]
struct RebalanceRequest {
    #[serde(default)]
    distribution: TimeDistribution,
    field: TimeField,
    value: f64,
}

async fn rebalance_time_distribution(
    Json(request): Json<RebalanceRequest>,
) -> Json<TimeDistribution> {
    Json(
        request
            .distribution
            .rebalance(request.field, request.value),
    )
}
