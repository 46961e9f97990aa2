//! Chart Routes
//!
//! Stateless chart rendering for callers that do not hold a session.
//!
//! - GET /api/v1/charts/pie?site= - Pie chart figure
//! - GET /api/v1/charts/scatter?site=&low=&high= - Scatter chart figure

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ScatterQuery, SiteQuery};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::Figure;

/// GET /api/v1/charts/pie
pub async fn pie_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SiteQuery>,
) -> ApiResult<Json<Figure>> {
    let figure = state.dashboard.pie_figure(&query.site())?;
    Ok(Json(figure))
}

/// GET /api/v1/charts/scatter
pub async fn scatter_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScatterQuery>,
) -> ApiResult<Json<Figure>> {
    let payload = query.payload_range(&state.dashboard)?;
    let figure = state.dashboard.scatter_figure(&query.site(), payload)?;
    Ok(Json(figure))
}
