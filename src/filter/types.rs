//! Selection inputs and summary outputs of the filter engine
//!
//! - `SiteFilter`: the dropdown value ("ALL" or one site)
//! - `PayloadRange`: the slider value (inclusive bounds)
//! - `SelectionState`: both of the above, owned by one session
//! - `SummaryTable`: the derived table handed to the chart renderer

use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};
use crate::dataset::Dataset;

/// Sentinel dropdown value meaning "every site"
pub const ALL_SITES: &str = "ALL";

/// Site dropdown selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteFilter {
    All,
    Site(String),
}

impl SiteFilter {
    /// True when `site` passes this filter
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(selected) => selected == site,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(site) => site,
        }
    }
}

impl Default for SiteFilter {
    fn default() -> Self {
        SiteFilter::All
    }
}

impl From<String> for SiteFilter {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value)
        }
    }
}

impl From<&str> for SiteFilter {
    fn from(value: &str) -> Self {
        SiteFilter::from(value.to_string())
    }
}

impl From<SiteFilter> for String {
    fn from(filter: SiteFilter) -> Self {
        match filter {
            SiteFilter::All => ALL_SITES.to_string(),
            SiteFilter::Site(site) => site,
        }
    }
}

impl std::fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive payload mass range in kilograms
///
/// Invariant: both bounds are finite and `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Create a range, rejecting non-finite or reversed bounds
    pub fn new(low: f64, high: f64) -> FilterResult<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(FilterError::InvalidRange(format!(
                "bounds must be finite numbers (got {} to {})",
                low, high
            )));
        }
        if low > high {
            return Err(FilterError::InvalidRange(format!(
                "lower bound {} exceeds upper bound {}",
                low, high
            )));
        }
        Ok(Self { low, high })
    }

    /// Range spanning every payload in `dataset`
    pub fn observed(dataset: &Dataset) -> Self {
        Self {
            low: dataset.min_payload(),
            high: dataset.max_payload(),
        }
    }

    /// Range from optional bounds, filling a missing one from `observed`
    ///
    /// A missing bound is widened so a single given bound outside the
    /// observed span still yields a valid (possibly empty) range.
    pub fn with_fallback(
        low: Option<f64>,
        high: Option<f64>,
        observed: PayloadRange,
    ) -> FilterResult<Self> {
        match (low, high) {
            (Some(low), Some(high)) => Self::new(low, high),
            (Some(low), None) => Self::new(low, observed.high.max(low)),
            (None, Some(high)) => Self::new(observed.low.min(high), high),
            (None, None) => Ok(observed),
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// `low <= mass <= high`, exact float comparison on both ends
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

/// Selection held by one dashboard session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl SelectionState {
    pub fn new(site: SiteFilter, payload: PayloadRange) -> Self {
        Self { site, payload }
    }

    /// Apply a widget change in place
    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::SiteChanged(site) => self.site = site,
            SelectionEvent::PayloadChanged(range) => self.payload = range,
        }
    }
}

/// A single widget change
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Dropdown value changed
    SiteChanged(SiteFilter),
    /// Range slider moved
    PayloadChanged(PayloadRange),
}

/// Successful missions for one site (the "ALL" pie)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSuccessCount {
    pub site: String,
    pub success_count: usize,
}

/// Launch count for one outcome at a single site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    /// "Yes" or "No"
    pub outcome: String,
    pub count: usize,
}

/// One launch in the scatter subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    /// 0 = failure, 1 = success
    pub outcome: u8,
    pub booster_category: String,
    pub launch_site: String,
}

/// Derived table produced by one filter engine call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum SummaryTable {
    /// site → success count, for `SiteFilter::All`
    SiteSuccesses(Vec<SiteSuccessCount>),
    /// outcome label → launch count, for a single site
    OutcomeCounts(Vec<OutcomeCount>),
    /// filtered launches, one row per point
    ScatterPoints(Vec<ScatterPoint>),
}

impl SummaryTable {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            SummaryTable::SiteSuccesses(rows) => rows.len(),
            SummaryTable::OutcomeCounts(rows) => rows.len(),
            SummaryTable::ScatterPoints(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the table shape, used in logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryTable::SiteSuccesses(_) => "site_successes",
            SummaryTable::OutcomeCounts(_) => "outcome_counts",
            SummaryTable::ScatterPoints(_) => "scatter_points",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_filter_from_string() {
        assert_eq!(SiteFilter::from("ALL"), SiteFilter::All);
        assert_eq!(
            SiteFilter::from("KSC LC-39A"),
            SiteFilter::Site("KSC LC-39A".to_string())
        );
        // Sentinel is case-sensitive, like the dropdown value
        assert_eq!(SiteFilter::from("all"), SiteFilter::Site("all".to_string()));
    }

    #[test]
    fn test_site_filter_serde() {
        let json = serde_json::to_string(&SiteFilter::All).unwrap();
        assert_eq!(json, "\"ALL\"");

        let filter: SiteFilter = serde_json::from_str("\"VAFB SLC-4E\"").unwrap();
        assert_eq!(filter, SiteFilter::Site("VAFB SLC-4E".to_string()));
    }

    #[test]
    fn test_site_filter_matches() {
        assert!(SiteFilter::All.matches("anything"));
        let site = SiteFilter::from("A");
        assert!(site.matches("A"));
        assert!(!site.matches("B"));
    }

    #[test]
    fn test_payload_range_validation() {
        assert!(PayloadRange::new(0.0, 10000.0).is_ok());
        assert!(PayloadRange::new(500.0, 500.0).is_ok());
        assert!(PayloadRange::new(6000.0, 5000.0).is_err());
        assert!(PayloadRange::new(f64::NAN, 10.0).is_err());
        assert!(PayloadRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_payload_range_inclusive() {
        let range = PayloadRange::new(1000.0, 2000.0).unwrap();
        assert!(range.contains(1000.0));
        assert!(range.contains(2000.0));
        assert!(range.contains(1500.0));
        assert!(!range.contains(999.9));
        assert!(!range.contains(2000.1));
    }

    #[test]
    fn test_payload_range_one_sided_bounds() {
        let observed = PayloadRange::new(500.0, 9600.0).unwrap();

        let range = PayloadRange::with_fallback(Some(9700.0), None, observed).unwrap();
        assert_eq!((range.low(), range.high()), (9700.0, 9700.0));

        let range = PayloadRange::with_fallback(None, Some(100.0), observed).unwrap();
        assert_eq!((range.low(), range.high()), (100.0, 100.0));

        let range = PayloadRange::with_fallback(Some(2000.0), None, observed).unwrap();
        assert_eq!((range.low(), range.high()), (2000.0, 9600.0));

        let range = PayloadRange::with_fallback(None, Some(3000.0), observed).unwrap();
        assert_eq!((range.low(), range.high()), (500.0, 3000.0));

        assert_eq!(PayloadRange::with_fallback(None, None, observed).unwrap(), observed);

        // Both given still goes through the usual checks
        assert!(PayloadRange::with_fallback(Some(6000.0), Some(5000.0), observed).is_err());
        assert!(PayloadRange::with_fallback(Some(f64::NAN), None, observed).is_err());
        assert!(PayloadRange::with_fallback(None, Some(f64::INFINITY), observed).is_err());
    }

    #[test]
    fn test_selection_apply() {
        let mut state = SelectionState::new(
            SiteFilter::All,
            PayloadRange::new(0.0, 9600.0).unwrap(),
        );

        state.apply(SelectionEvent::SiteChanged(SiteFilter::from("A")));
        assert_eq!(state.site, SiteFilter::from("A"));

        let range = PayloadRange::new(1000.0, 3000.0).unwrap();
        state.apply(SelectionEvent::PayloadChanged(range));
        assert_eq!(state.payload, range);
        assert_eq!(state.site, SiteFilter::from("A"));
    }

    #[test]
    fn test_summary_table_serialize() {
        let table = SummaryTable::OutcomeCounts(vec![OutcomeCount {
            outcome: "Yes".to_string(),
            count: 3,
        }]);
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"kind\":\"outcome_counts\""));
        assert!(json.contains("\"outcome\":\"Yes\""));
        assert_eq!(table.len(), 1);
        assert_eq!(table.kind(), "outcome_counts");
    }
}
