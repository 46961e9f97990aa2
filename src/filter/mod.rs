//! Filter Engine
//!
//! Turns a session's selection (site dropdown + payload slider) into the
//! summary tables behind the two dashboard charts.
//!
//! | Selection | Pie table | Scatter table |
//! |---|---|---|
//! | `ALL` | successes per site | launches in range |
//! | one site | Yes/No counts at that site | that site's launches in range |
//!
//! Empty results are valid tables, never errors.

mod engine;
mod error;
mod types;

pub use engine::{outcome_distribution, scatter_subset};
pub use error::{FilterError, FilterResult};
pub use types::{
    OutcomeCount, PayloadRange, ScatterPoint, SelectionEvent, SelectionState, SiteFilter,
    SiteSuccessCount, SummaryTable, ALL_SITES,
};
