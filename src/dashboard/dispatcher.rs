//! Dashboard Dispatcher
//!
//! On every selection change the dashboard recomputes both charts:
//! filter engine first, then the renderer. The work is synchronous and
//! cheap, so there is no caching or debouncing.

use serde::Serialize;
use std::sync::Arc;

use super::layout::{DashboardLayout, LayoutConfig};
use crate::chart::{ChartError, ChartKind, ChartLabels, ChartRenderer, Figure};
use crate::dataset::Dataset;
use crate::filter::{
    outcome_distribution, scatter_subset, PayloadRange, SelectionState, SiteFilter, SummaryTable,
};

/// Both charts for one selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardUpdate {
    pub pie: Figure,
    pub scatter: Figure,
}

/// Shared, read-only dashboard: dataset, renderer and widget layout
pub struct Dashboard {
    dataset: Arc<Dataset>,
    renderer: ChartRenderer,
    layout: DashboardLayout,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, labels: ChartLabels, layout: &LayoutConfig) -> Self {
        let layout = DashboardLayout::build(layout, &dataset);
        Self {
            dataset,
            renderer: ChartRenderer::new(labels),
            layout,
        }
    }

    /// Dashboard with default labels and widget settings
    pub fn with_defaults(dataset: Arc<Dataset>) -> Self {
        Self::new(dataset, ChartLabels::default(), &LayoutConfig::default())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    /// Full payload range of the dataset
    pub fn observed_payload_range(&self) -> PayloadRange {
        PayloadRange::observed(&self.dataset)
    }

    /// Selection a new session starts with: all sites, observed payload span
    pub fn initial_selection(&self) -> SelectionState {
        SelectionState::new(SiteFilter::All, self.observed_payload_range())
    }

    /// Pie chart table for the dropdown value
    pub fn outcome_table(&self, site: &SiteFilter) -> SummaryTable {
        outcome_distribution(&self.dataset, site)
    }

    /// Scatter chart table for dropdown and slider values
    pub fn scatter_table(&self, site: &SiteFilter, payload: PayloadRange) -> SummaryTable {
        scatter_subset(&self.dataset, site, payload)
    }

    pub fn pie_figure(&self, site: &SiteFilter) -> Result<Figure, ChartError> {
        self.renderer.render(ChartKind::Pie, &self.outcome_table(site))
    }

    pub fn scatter_figure(
        &self,
        site: &SiteFilter,
        payload: PayloadRange,
    ) -> Result<Figure, ChartError> {
        self.renderer
            .render(ChartKind::Scatter, &self.scatter_table(site, payload))
    }

    /// Recompute both charts for `selection`
    pub fn render(&self, selection: &SelectionState) -> Result<DashboardUpdate, ChartError> {
        let pie = self.pie_figure(&selection.site)?;
        let scatter = self.scatter_figure(&selection.site, selection.payload)?;

        tracing::debug!(
            site = %selection.site,
            low = selection.payload.low(),
            high = selection.payload.high(),
            pie_slices = pie.point_count(),
            scatter_points = scatter.point_count(),
            "Rendered dashboard"
        );

        Ok(DashboardUpdate { pie, scatter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Trace;
    use crate::dataset::{LaunchRecord, Outcome};
    use crate::filter::SelectionEvent;

    fn dashboard() -> Dashboard {
        let dataset = Dataset::new(vec![
            LaunchRecord::new("A", 500.0, Outcome::Success, "v1.1"),
            LaunchRecord::new("A", 2500.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 3000.0, Outcome::Failure, "FT"),
            LaunchRecord::new("A", 4000.0, Outcome::Success, "B4"),
        ])
        .unwrap();
        Dashboard::with_defaults(Arc::new(dataset))
    }

    #[test]
    fn test_initial_selection_spans_dataset() {
        let dashboard = dashboard();
        let selection = dashboard.initial_selection();

        assert_eq!(selection.site, SiteFilter::All);
        assert_eq!(selection.payload.low(), 500.0);
        assert_eq!(selection.payload.high(), 4000.0);
    }

    #[test]
    fn test_render_initial() {
        let dashboard = dashboard();
        let update = dashboard.render(&dashboard.initial_selection()).unwrap();

        assert_eq!(update.pie.layout.title.text, "Successful Missions per Site");
        assert_eq!(update.scatter.point_count(), 4);
    }

    #[test]
    fn test_render_after_events() {
        let dashboard = dashboard();
        let mut selection = dashboard.initial_selection();

        selection.apply(SelectionEvent::SiteChanged(SiteFilter::from("A")));
        selection.apply(SelectionEvent::PayloadChanged(
            PayloadRange::new(1000.0, 5000.0).unwrap(),
        ));

        let update = dashboard.render(&selection).unwrap();

        match &update.pie.data[0] {
            Trace::Pie { labels, values, .. } => {
                assert_eq!(labels, &vec!["Yes".to_string(), "No".to_string()]);
                assert_eq!(values, &vec![2, 1]);
            }
            other => panic!("Expected pie trace, got {:?}", other),
        }
        assert_eq!(update.scatter.point_count(), 2);
    }

    #[test]
    fn test_render_empty_selection() {
        let dashboard = dashboard();
        let selection = SelectionState::new(
            SiteFilter::All,
            PayloadRange::new(5000.0, 6000.0).unwrap(),
        );

        let update = dashboard.render(&selection).unwrap();
        assert_eq!(update.scatter.point_count(), 0);
    }

    #[test]
    fn test_identical_selections_render_identically() {
        let dashboard = dashboard();
        let selection = dashboard.initial_selection();

        assert_eq!(
            dashboard.render(&selection).unwrap(),
            dashboard.render(&selection.clone()).unwrap()
        );
    }
}
