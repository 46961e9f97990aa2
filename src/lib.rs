//! # Launchdash
//!
//! Interactive dashboard over SpaceX launch records. A small browser page
//! with a launch-site dropdown and a payload-range slider drives two
//! charts: a success pie and a payload/outcome scatter.
//!
//! ## Features
//!
//! - **Immutable dataset**: CSV loaded once at startup, shared read-only
//! - **Filter engine**: pure functions from selection to summary table
//! - **Plotly figures**: charts rendered as JSON for the browser to draw
//! - **Per-session state**: each WebSocket session keeps its own selection
//!
//! ## Modules
//!
//! - [`dataset`]: Launch records and CSV loading
//! - [`filter`]: Selection types and the two summary computations
//! - [`chart`]: Summary table to figure rendering
//! - [`dashboard`]: Widget layout and selection dispatch
//! - [`session`]: WebSocket sessions
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use launchdash::dataset::load_dataset;
//! use launchdash::filter::{outcome_distribution, scatter_subset, PayloadRange, SiteFilter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = load_dataset("data/spacex_launch_dash.csv".as_ref())?;
//!
//!     // Successes per site
//!     let pie = outcome_distribution(&dataset, &SiteFilter::All);
//!     println!("{} sites", pie.len());
//!
//!     // One site's launches between 2000 and 8000 kg
//!     let site = SiteFilter::from("KSC LC-39A");
//!     let scatter = scatter_subset(&dataset, &site, PayloadRange::new(2000.0, 8000.0)?);
//!     println!("{} launches in range", scatter.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod session;

// Re-export top-level types for convenience
pub use dataset::{
    load_dataset, ColumnMapping, Dataset, DatasetError, DatasetLoader, DatasetResult,
    DatasetStats, LaunchRecord, Outcome,
};

pub use filter::{
    outcome_distribution, scatter_subset, FilterError, FilterResult, PayloadRange,
    SelectionEvent, SelectionState, SiteFilter, SummaryTable, ALL_SITES,
};

pub use chart::{ChartError, ChartKind, ChartLabels, ChartRenderer, Figure};

pub use dashboard::{Dashboard, DashboardLayout, DashboardUpdate, LayoutConfig};

pub use session::{
    websocket_handler, ClientMessage, HubConfig, HubError, ServerMessage, SessionHub,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
