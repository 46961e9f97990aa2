//! CSV Loader
//!
//! Reads the launch dataset from a CSV file with a header row.
//! Columns are located by header name; unknown columns (including a leading
//! unnamed index column) are ignored. Any malformed row aborts the load.

use serde::Deserialize;
use std::path::Path;

use super::error::{DatasetError, DatasetResult};
use super::types::{Dataset, LaunchRecord, Outcome};

/// Header names of the dataset columns
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ColumnMapping {
    #[serde(default = "default_site_column")]
    pub launch_site: String,

    #[serde(default = "default_payload_column")]
    pub payload_mass: String,

    #[serde(default = "default_outcome_column")]
    pub outcome: String,

    #[serde(default = "default_booster_category_column")]
    pub booster_category: String,

    #[serde(default = "default_flight_number_column")]
    pub flight_number: String,

    #[serde(default = "default_booster_version_column")]
    pub booster_version: String,
}

fn default_site_column() -> String {
    "Launch Site".to_string()
}

fn default_payload_column() -> String {
    "Payload Mass (kg)".to_string()
}

fn default_outcome_column() -> String {
    "class".to_string()
}

fn default_booster_category_column() -> String {
    "Booster Version Category".to_string()
}

fn default_flight_number_column() -> String {
    "Flight Number".to_string()
}

fn default_booster_version_column() -> String {
    "Booster Version".to_string()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            launch_site: default_site_column(),
            payload_mass: default_payload_column(),
            outcome: default_outcome_column(),
            booster_category: default_booster_category_column(),
            flight_number: default_flight_number_column(),
            booster_version: default_booster_version_column(),
        }
    }
}

/// Resolved column positions for one file
struct ColumnIndices {
    launch_site: usize,
    payload_mass: usize,
    outcome: usize,
    booster_category: usize,
    flight_number: Option<usize>,
    booster_version: Option<usize>,
}

impl ColumnIndices {
    fn resolve(headers: &csv::StringRecord, mapping: &ColumnMapping) -> DatasetResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| DatasetError::MissingColumn(name.to_string()));

        Ok(Self {
            launch_site: require(&mapping.launch_site)?,
            payload_mass: require(&mapping.payload_mass)?,
            outcome: require(&mapping.outcome)?,
            booster_category: require(&mapping.booster_category)?,
            flight_number: find(&mapping.flight_number),
            booster_version: find(&mapping.booster_version),
        })
    }
}

/// Loads a [`Dataset`] from CSV
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    columns: ColumnMapping,
}

impl DatasetLoader {
    /// Create a loader using the default column names
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom column mapping
    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    /// Load the dataset from a file
    pub fn load(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let dataset = self.load_from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            sites = dataset.sites().len(),
            "Loaded launch dataset"
        );

        Ok(dataset)
    }

    /// Load from an in-memory CSV string (useful for testing)
    pub fn load_str(&self, csv_data: &str) -> DatasetResult<Dataset> {
        self.load_from_reader(csv_data.as_bytes())
    }

    fn load_from_reader<R: std::io::Read>(&self, input: R) -> DatasetResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let indices = ColumnIndices::resolve(&headers, &self.columns)?;

        let mut records = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row as u64 + 2);
            records.push(parse_record(&record, &indices, line)?);
        }

        Dataset::new(records)
    }
}

fn parse_record(
    record: &csv::StringRecord,
    indices: &ColumnIndices,
    line: u64,
) -> DatasetResult<LaunchRecord> {
    let invalid = |reason: String| DatasetError::InvalidRecord { line, reason };
    let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

    let launch_site = field(indices.launch_site);
    if launch_site.is_empty() {
        return Err(invalid("launch site is empty".to_string()));
    }

    let payload_str = field(indices.payload_mass);
    let payload_mass_kg: f64 = payload_str
        .parse()
        .map_err(|_| invalid(format!("payload mass '{}' is not a number", payload_str)))?;
    if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
        return Err(invalid(format!(
            "payload mass {} must be a non-negative finite number",
            payload_str
        )));
    }

    let outcome_str = field(indices.outcome);
    let outcome = parse_outcome(outcome_str)
        .ok_or_else(|| invalid(format!("class '{}' must be 0 or 1", outcome_str)))?;

    let booster_category = field(indices.booster_category);
    if booster_category.is_empty() {
        return Err(invalid("booster version category is empty".to_string()));
    }

    let mut launch = LaunchRecord::new(launch_site, payload_mass_kg, outcome, booster_category);

    if let Some(idx) = indices.flight_number {
        let value = field(idx);
        if !value.is_empty() {
            let number = value
                .parse::<u32>()
                .map_err(|_| invalid(format!("flight number '{}' is not an integer", value)))?;
            launch = launch.flight_number(number);
        }
    }

    if let Some(idx) = indices.booster_version {
        let value = field(idx);
        if !value.is_empty() {
            launch = launch.booster_version(value);
        }
    }

    Ok(launch)
}

/// Accepts "0"/"1" and the float spellings "0.0"/"1.0"
fn parse_outcome(value: &str) -> Option<Outcome> {
    if let Ok(flag) = value.parse::<u8>() {
        return Outcome::from_flag(flag);
    }
    match value.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(Outcome::Failure),
        Ok(v) if v == 1.0 => Some(Outcome::Success),
        _ => None,
    }
}

/// Load a dataset from a file using the default column names
pub fn load_dataset(path: &Path) -> DatasetResult<Dataset> {
    DatasetLoader::new().load(path)
}
