//! Dashboard Routes
//!
//! The page shell and the data it needs to draw its widgets.
//!
//! - GET / - Dashboard page
//! - GET /api/v1/layout - Dropdown and slider description
//! - GET /api/v1/dataset - Dataset summary

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::dashboard::DashboardLayout;
use crate::dataset::DatasetStats;

const DASHBOARD_PAGE: &str = include_str!("../../../assets/dashboard.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// GET /api/v1/layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.dashboard.layout().clone())
}

/// GET /api/v1/dataset
pub async fn dataset_stats(State(state): State<Arc<AppState>>) -> Json<DatasetStats> {
    Json(state.dataset().stats())
}
