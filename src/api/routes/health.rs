//! Health Routes
//!
//! Health check endpoints for monitoring and orchestrators.
//!
//! - GET /health/live - Liveness (process is alive)
//! - GET /health/ready - Readiness (a new session can still open)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 503 while the session limit is reached, since a new dashboard
/// page could not open its WebSocket.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.at_capacity().await {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// GET /health
///
/// Full health status with dataset and session details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = state.dataset();
    let status = if state.at_capacity().await {
        "saturated"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        records: dataset.len(),
        sites: dataset.sites().len(),
        sessions: state.session_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
