//! Core data types for the launch dataset
//!
//! - `LaunchRecord`: one launch row
//! - `Outcome`: mission success flag
//! - `Dataset`: the immutable, ordered collection of records
//! - `DatasetStats`: summary numbers shown by the dashboard and CLI

use serde::{Deserialize, Serialize};

use super::error::{DatasetError, DatasetResult};

/// Mission outcome, stored in the dataset as the `class` flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// class = 0
    Failure,
    /// class = 1
    Success,
}

impl Outcome {
    /// Decode the 0/1 class flag
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The 0/1 class flag
    pub fn flag(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Label used in the outcome pie chart
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "No",
            Outcome::Success => "Yes",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single launch row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier (e.g. "CCAFS LC-40")
    pub launch_site: String,
    /// Payload mass in kilograms
    pub payload_mass_kg: f64,
    /// Mission outcome
    pub outcome: Outcome,
    /// Booster version category (e.g. "FT", "B4")
    pub booster_category: String,
    /// Flight number, when the source carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    /// Full booster version, when the source carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    /// Create a record with the four required attributes
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
            flight_number: None,
            booster_version: None,
        }
    }

    /// Builder method: set flight number
    pub fn flight_number(mut self, number: u32) -> Self {
        self.flight_number = Some(number);
        self
    }

    /// Builder method: set full booster version
    pub fn booster_version(mut self, version: impl Into<String>) -> Self {
        self.booster_version = Some(version.into());
        self
    }
}

/// Immutable, ordered collection of launch records
///
/// Built once at startup and shared behind an `Arc`. Distinct sites and
/// booster categories are kept in first-appearance order so every view
/// derived from the dataset is stable across calls.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    booster_categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl Dataset {
    /// Build a dataset from records
    ///
    /// Fails when `records` is empty or a payload mass is negative or not
    /// finite.
    pub fn new(records: Vec<LaunchRecord>) -> DatasetResult<Self> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for record in &records {
            if !record.payload_mass_kg.is_finite() || record.payload_mass_kg < 0.0 {
                return Err(DatasetError::InvalidPayload {
                    site: record.launch_site.clone(),
                    value: record.payload_mass_kg,
                });
            }
            if !sites.contains(&record.launch_site) {
                sites.push(record.launch_site.clone());
            }
            if !booster_categories.contains(&record.booster_category) {
                booster_categories.push(record.booster_category.clone());
            }
            min_payload = min_payload.min(record.payload_mass_kg);
            max_payload = max_payload.max(record.payload_mass_kg);
        }

        Ok(Self {
            records,
            sites,
            booster_categories,
            min_payload,
            max_payload,
        })
    }

    /// All records in file order
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites in first-appearance order
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Distinct booster categories in first-appearance order
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Smallest observed payload mass (kg)
    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    /// Largest observed payload mass (kg)
    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// Number of successful missions across the whole dataset
    pub fn total_successes(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    /// Summary numbers for display
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            records: self.len(),
            successes: self.total_successes(),
            min_payload_kg: self.min_payload,
            max_payload_kg: self.max_payload,
            sites: self.sites.clone(),
            booster_categories: self.booster_categories.clone(),
        }
    }
}

/// Dataset summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    pub records: usize,
    pub successes: usize,
    pub min_payload_kg: f64,
    pub max_payload_kg: f64,
    pub sites: Vec<String>,
    pub booster_categories: Vec<String>,
}

impl std::fmt::Display for DatasetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} launches ({} successful), {} sites, {} booster categories, payload {:.0}-{:.0} kg",
            self.records,
            self.successes,
            self.sites.len(),
            self.booster_categories.len(),
            self.min_payload_kg,
            self.max_payload_kg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 2296.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC LC-39A", 9600.0, Outcome::Success, "FT"),
        ]
    }

    #[test]
    fn test_outcome_flags() {
        assert_eq!(Outcome::from_flag(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_flag(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_flag(2), None);
        assert_eq!(Outcome::Success.flag(), 1);
        assert_eq!(Outcome::Failure.label(), "No");
        assert_eq!(Outcome::Success.to_string(), "Yes");
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = Dataset::new(Vec::new());
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn test_invalid_payload_rejected() {
        let result = Dataset::new(vec![LaunchRecord::new("A", f64::NAN, Outcome::Success, "FT")]);
        assert!(matches!(result, Err(DatasetError::InvalidPayload { .. })));

        let result = Dataset::new(vec![LaunchRecord::new("A", -1.0, Outcome::Success, "FT")]);
        assert!(matches!(result, Err(DatasetError::InvalidPayload { .. })));
    }

    #[test]
    fn test_distinct_values_keep_first_appearance_order() {
        let dataset = Dataset::new(sample_records()).unwrap();

        assert_eq!(
            dataset.sites(),
            &["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
        assert_eq!(dataset.booster_categories(), &["v1.0", "v1.1", "FT"]);
    }

    #[test]
    fn test_stats() {
        let dataset = Dataset::new(sample_records()).unwrap();
        let stats = dataset.stats();

        assert_eq!(stats.records, 4);
        assert_eq!(stats.successes, 2);
        assert_eq!(stats.min_payload_kg, 0.0);
        assert_eq!(stats.max_payload_kg, 9600.0);
        assert_eq!(stats.sites.len(), 3);
        assert!(stats.to_string().contains("4 launches (2 successful)"));
    }

    #[test]
    fn test_record_builder() {
        let record = LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success, "FT")
            .flight_number(19)
            .booster_version("F9 FT B1031.1");

        assert_eq!(record.flight_number, Some(19));
        assert_eq!(record.booster_version.as_deref(), Some("F9 FT B1031.1"));
    }
}
