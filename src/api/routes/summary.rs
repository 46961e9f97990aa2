//! Summary Routes
//!
//! Raw filter engine output, without chart formatting.
//!
//! - GET /api/v1/summary/outcomes?site= - Pie chart table
//! - GET /api/v1/summary/scatter?site=&low=&high= - Scatter chart table

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ScatterQuery, SiteQuery, SummaryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/summary/outcomes
pub async fn outcomes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SiteQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let site = query.site();
    let table = state.dashboard.outcome_table(&site);

    Ok(Json(SummaryResponse {
        site,
        payload: None,
        row_count: table.len(),
        table,
    }))
}

/// GET /api/v1/summary/scatter
pub async fn scatter(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScatterQuery>,
) -> ApiResult<Json<SummaryResponse>> {
    let site = query.site();
    let payload = query.payload_range(&state.dashboard)?;
    let table = state.dashboard.scatter_table(&site, payload);

    Ok(Json(SummaryResponse {
        site,
        payload: Some(payload),
        row_count: table.len(),
        table,
    }))
}
