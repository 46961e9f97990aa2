//! Chart Rendering
//!
//! Summary tables become Plotly-compatible figures; the browser does the
//! drawing.

mod figure;
mod renderer;

pub use figure::{Axis, Figure, Layout, Legend, Marker, Title, Trace};
pub use renderer::{ChartError, ChartKind, ChartLabels, ChartRenderer, CATEGORY_PALETTE};
