//! Chart Renderer
//!
//! Converts a [`SummaryTable`] into a [`Figure`]. Stateless: the renderer
//! only carries the labels it stamps onto each figure.

use serde::Deserialize;
use thiserror::Error;

use super::figure::{Axis, Figure, Layout, Legend, Marker, Title, Trace};
use crate::filter::{ScatterPoint, SummaryTable};

/// Plotly's default qualitative palette, assigned to booster categories in
/// order of first appearance
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Which chart to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Scatter,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Pie => write!(f, "pie"),
            ChartKind::Scatter => write!(f, "scatter"),
        }
    }
}

/// Titles and axis/legend bindings stamped onto figures
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartLabels {
    #[serde(default = "default_all_sites_pie_title")]
    pub all_sites_pie_title: String,

    #[serde(default = "default_site_pie_title")]
    pub site_pie_title: String,

    #[serde(default = "default_scatter_title")]
    pub scatter_title: String,

    #[serde(default = "default_payload_axis")]
    pub payload_axis: String,

    #[serde(default = "default_outcome_axis")]
    pub outcome_axis: String,

    #[serde(default = "default_color_legend")]
    pub color_legend: String,
}

fn default_all_sites_pie_title() -> String {
    "Successful Missions per Site".to_string()
}

fn default_site_pie_title() -> String {
    "Portion of Successful Missions".to_string()
}

fn default_scatter_title() -> String {
    "Mission success with respect to payload".to_string()
}

fn default_payload_axis() -> String {
    "Payload Mass (kg)".to_string()
}

fn default_outcome_axis() -> String {
    "class".to_string()
}

fn default_color_legend() -> String {
    "Booster Version Category".to_string()
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            all_sites_pie_title: default_all_sites_pie_title(),
            site_pie_title: default_site_pie_title(),
            scatter_title: default_scatter_title(),
            payload_axis: default_payload_axis(),
            outcome_axis: default_outcome_axis(),
            color_legend: default_color_legend(),
        }
    }
}

/// Rendering errors
#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    /// The table shape cannot be drawn as the requested chart
    #[error("Cannot render {table} table as a {kind} chart")]
    KindMismatch {
        kind: ChartKind,
        table: &'static str,
    },
}

/// Summary table → figure
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    labels: ChartLabels,
}

impl ChartRenderer {
    pub fn new(labels: ChartLabels) -> Self {
        Self { labels }
    }

    /// Render `table` as a chart of `kind`
    pub fn render(&self, kind: ChartKind, table: &SummaryTable) -> Result<Figure, ChartError> {
        match (kind, table) {
            (ChartKind::Pie, SummaryTable::SiteSuccesses(rows)) => Ok(self.pie(
                &self.labels.all_sites_pie_title,
                rows.iter().map(|r| (r.site.clone(), r.success_count)),
            )),
            (ChartKind::Pie, SummaryTable::OutcomeCounts(rows)) => Ok(self.pie(
                &self.labels.site_pie_title,
                rows.iter().map(|r| (r.outcome.clone(), r.count)),
            )),
            (ChartKind::Scatter, SummaryTable::ScatterPoints(points)) => Ok(self.scatter(points)),
            (kind, table) => Err(ChartError::KindMismatch {
                kind,
                table: table.kind(),
            }),
        }
    }

    fn pie(&self, title: &str, slices: impl Iterator<Item = (String, usize)>) -> Figure {
        let (labels, values): (Vec<String>, Vec<usize>) = slices.unzip();
        Figure {
            data: vec![Trace::Pie {
                labels,
                values,
                name: None,
            }],
            layout: Layout::titled(title),
        }
    }

    /// One marker trace per booster category, so each category gets its
    /// own colour and legend entry
    fn scatter(&self, points: &[ScatterPoint]) -> Figure {
        let mut categories: Vec<&str> = Vec::new();
        for point in points {
            if !categories.contains(&point.booster_category.as_str()) {
                categories.push(&point.booster_category);
            }
        }

        let data = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let (x, y): (Vec<f64>, Vec<u8>) = points
                    .iter()
                    .filter(|p| p.booster_category == *category)
                    .map(|p| (p.payload_mass_kg, p.outcome))
                    .unzip();
                Trace::Scatter {
                    name: category.to_string(),
                    mode: "markers".to_string(),
                    x,
                    y,
                    marker: Marker {
                        color: CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()].to_string(),
                    },
                    legendgroup: category.to_string(),
                    showlegend: true,
                }
            })
            .collect();

        Figure {
            data,
            layout: Layout {
                title: Title::new(&self.labels.scatter_title),
                xaxis: Some(Axis {
                    title: Title::new(&self.labels.payload_axis),
                }),
                yaxis: Some(Axis {
                    title: Title::new(&self.labels.outcome_axis),
                }),
                legend: Some(Legend {
                    title: Title::new(&self.labels.color_legend),
                }),
            },
        }
    }
}
