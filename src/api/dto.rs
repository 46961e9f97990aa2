//! Data Transfer Objects
//!
//! Query-string and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::dashboard::Dashboard;
use crate::filter::{FilterResult, PayloadRange, SiteFilter, SummaryTable};

// ============================================
// REQUEST DTOs
// ============================================

/// `?site=` query, defaulting to every site
#[derive(Debug, Default, Deserialize)]
pub struct SiteQuery {
    #[serde(default)]
    pub site: Option<SiteFilter>,
}

impl SiteQuery {
    pub fn site(&self) -> SiteFilter {
        self.site.clone().unwrap_or_default()
    }
}

/// `?site=&low=&high=` query
///
/// Missing bounds fall back to the observed payload range, widened to
/// cover a single given bound.
#[derive(Debug, Default, Deserialize)]
pub struct ScatterQuery {
    #[serde(default)]
    pub site: Option<SiteFilter>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

impl ScatterQuery {
    pub fn site(&self) -> SiteFilter {
        self.site.clone().unwrap_or_default()
    }

    pub fn payload_range(&self, dashboard: &Dashboard) -> FilterResult<PayloadRange> {
        PayloadRange::with_fallback(self.low, self.high, dashboard.observed_payload_range())
    }
}

// ============================================
// RESPONSE DTOs
// ============================================

/// Summary table together with the selection that produced it
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub site: SiteFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<PayloadRange>,
    pub row_count: usize,
    pub table: SummaryTable,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub records: usize,
    pub sites: usize,
    pub sessions: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
