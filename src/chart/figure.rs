//! Figure model
//!
//! A small subset of the Plotly.js figure schema: enough to describe a pie
//! chart and a categorical scatter chart. Serialises to the JSON that
//! `Plotly.react(element, figure.data, figure.layout)` expects.

use serde::Serialize;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// Total number of plotted points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::point_count).sum()
    }
}

/// One trace of a figure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Scatter {
        name: String,
        mode: String,
        x: Vec<f64>,
        y: Vec<u8>,
        marker: Marker,
        legendgroup: String,
        showlegend: bool,
    },
}

impl Trace {
    pub fn point_count(&self) -> usize {
        match self {
            Trace::Pie { values, .. } => values.len(),
            Trace::Scatter { x, .. } => x.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl Layout {
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Title::new(text),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_trace_serialize() {
        let trace = Trace::Pie {
            labels: vec!["Yes".to_string(), "No".to_string()],
            values: vec![3, 1],
            name: None,
        };
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["type"], "pie");
        assert_eq!(json["labels"][0], "Yes");
        assert_eq!(json["values"][1], 1);
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_layout_omits_missing_axes() {
        let layout = Layout::titled("Portion of Successful Missions");
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["title"]["text"], "Portion of Successful Missions");
        assert!(json.get("xaxis").is_none());
        assert!(json.get("legend").is_none());
    }
}
