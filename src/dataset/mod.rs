//! Launch Dataset
//!
//! The dataset is read once at startup and never mutated afterwards.
//! Failure to load it is fatal: the server does not start without data.
//!
//! ## Architecture
//!
//! - **Loader**: CSV parsing with header-based column lookup
//! - **Types**: `LaunchRecord`, `Outcome`, `Dataset`
//! - **Error**: `DatasetError`

mod error;
mod loader;
mod types;

pub use error::{DatasetError, DatasetResult};
pub use loader::{load_dataset, ColumnMapping, DatasetLoader};
pub use types::{Dataset, DatasetStats, LaunchRecord, Outcome};
