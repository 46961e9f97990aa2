//! Dashboard Layout
//!
//! Describes the widgets the page shell draws: the site dropdown and the
//! payload range slider. Option values come from the dataset at load time.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::filter::ALL_SITES;

/// Widget settings that do not depend on the data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_all_sites_label")]
    pub all_sites_label: String,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_slider_min")]
    pub slider_min: f64,

    #[serde(default = "default_slider_max")]
    pub slider_max: f64,

    #[serde(default = "default_slider_step")]
    pub slider_step: f64,

    #[serde(default = "default_mark_interval")]
    pub mark_interval: f64,
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

fn default_all_sites_label() -> String {
    "All Sites".to_string()
}

fn default_placeholder() -> String {
    "Select a Launch Site here".to_string()
}

fn default_slider_min() -> f64 {
    0.0
}

fn default_slider_max() -> f64 {
    10_000.0
}

fn default_slider_step() -> f64 {
    1_000.0
}

fn default_mark_interval() -> f64 {
    2_000.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            all_sites_label: default_all_sites_label(),
            placeholder: default_placeholder(),
            slider_min: default_slider_min(),
            slider_max: default_slider_max(),
            slider_step: default_slider_step(),
            mark_interval: default_mark_interval(),
        }
    }
}

/// Upper bound on slider marks
pub const MAX_SLIDER_MARKS: usize = 100;

impl LayoutConfig {
    /// Reject slider settings the page cannot draw
    ///
    /// `mark_interval = 0` is allowed and means "no marks".
    pub fn validate(&self) -> Result<(), String> {
        let bounds = [
            ("slider_min", self.slider_min),
            ("slider_max", self.slider_max),
            ("slider_step", self.slider_step),
            ("mark_interval", self.mark_interval),
        ];
        for (name, value) in bounds {
            if !value.is_finite() {
                return Err(format!("{} must be a finite number (got {})", name, value));
            }
        }
        if self.slider_min > self.slider_max {
            return Err(format!(
                "slider_min {} exceeds slider_max {}",
                self.slider_min, self.slider_max
            ));
        }
        if self.slider_step <= 0.0 {
            return Err(format!("slider_step must be positive (got {})", self.slider_step));
        }
        if self.mark_interval < 0.0 {
            return Err(format!(
                "mark_interval must not be negative (got {})",
                self.mark_interval
            ));
        }
        if self.mark_interval > 0.0 && self.mark_count().is_none() {
            return Err(format!(
                "mark_interval {} gives more than {} slider marks",
                self.mark_interval, MAX_SLIDER_MARKS
            ));
        }
        Ok(())
    }

    /// Number of marks from `slider_min` to `slider_max`, or `None` when
    /// there are none to draw or too many
    fn mark_count(&self) -> Option<usize> {
        if !self.slider_min.is_finite()
            || !self.slider_max.is_finite()
            || !self.mark_interval.is_finite()
            || self.mark_interval <= 0.0
            || self.slider_min > self.slider_max
        {
            return None;
        }

        let steps = ((self.slider_max - self.slider_min) / self.mark_interval).floor();
        if steps >= MAX_SLIDER_MARKS as f64 {
            return None;
        }
        Some(steps as usize + 1)
    }
}

/// Full widget description sent to the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_dropdown: SiteDropdown,
    pub payload_slider: PayloadSlider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDropdown {
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    /// Initial [low, high], spanning the observed payloads
    pub value: [f64; 2],
    /// Whether the two handles may pass each other
    pub allow_cross: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

impl DashboardLayout {
    /// Build the layout for `dataset`
    pub fn build(config: &LayoutConfig, dataset: &Dataset) -> Self {
        let mut options = vec![DropdownOption {
            label: config.all_sites_label.clone(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(dataset.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        Self {
            title: config.title.clone(),
            site_dropdown: SiteDropdown {
                options,
                value: ALL_SITES.to_string(),
                placeholder: config.placeholder.clone(),
                searchable: true,
            },
            payload_slider: PayloadSlider {
                min: config.slider_min,
                max: config.slider_max,
                step: config.slider_step,
                marks: slider_marks(config),
                value: [dataset.min_payload(), dataset.max_payload()],
                allow_cross: false,
            },
        }
    }
}

fn slider_marks(config: &LayoutConfig) -> Vec<SliderMark> {
    let Some(count) = config.mark_count() else {
        return Vec::new();
    };

    (0..count)
        .map(|idx| {
            let value = config.slider_min + config.mark_interval * idx as f64;
            SliderMark {
                value,
                label: format!("{}", value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchRecord, Outcome};

    fn dataset() -> Dataset {
        Dataset::new(vec![
            LaunchRecord::new("CCAFS LC-40", 362.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
        ])
        .unwrap()
    }

    #[test]
    fn test_dropdown_options() {
        let layout = DashboardLayout::build(&LayoutConfig::default(), &dataset());
        let dropdown = &layout.site_dropdown;

        let values: Vec<&str> = dropdown.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(dropdown.options[0].label, "All Sites");
        assert_eq!(dropdown.value, "ALL");
        assert!(dropdown.searchable);
    }

    #[test]
    fn test_slider_defaults() {
        let layout = DashboardLayout::build(&LayoutConfig::default(), &dataset());
        let slider = &layout.payload_slider;

        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 10000.0);
        assert_eq!(slider.step, 1000.0);
        assert_eq!(slider.value, [362.0, 9600.0]);
        assert!(!slider.allow_cross);

        let labels: Vec<&str> = slider.marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "2000", "4000", "6000", "8000", "10000"]);
    }

    #[test]
    fn test_non_finite_settings_build_without_marks() {
        let configs = [
            LayoutConfig {
                mark_interval: f64::NAN,
                ..Default::default()
            },
            LayoutConfig {
                slider_max: f64::INFINITY,
                ..Default::default()
            },
            LayoutConfig {
                slider_min: f64::NEG_INFINITY,
                ..Default::default()
            },
        ];

        for config in configs {
            assert!(config.validate().is_err());
            let layout = DashboardLayout::build(&config, &dataset());
            assert!(layout.payload_slider.marks.is_empty());
        }
    }

    #[test]
    fn test_validate_slider_settings() {
        assert!(LayoutConfig::default().validate().is_ok());

        let reversed = LayoutConfig {
            slider_min: 5000.0,
            slider_max: 1000.0,
            ..Default::default()
        };
        assert!(reversed.validate().is_err());

        let zero_step = LayoutConfig {
            slider_step: 0.0,
            ..Default::default()
        };
        assert!(zero_step.validate().is_err());

        let dense = LayoutConfig {
            mark_interval: 1.0,
            ..Default::default()
        };
        assert!(dense.validate().is_err());
        assert!(DashboardLayout::build(&dense, &dataset())
            .payload_slider
            .marks
            .is_empty());

        let no_marks = LayoutConfig {
            mark_interval: 0.0,
            ..Default::default()
        };
        assert!(no_marks.validate().is_ok());
    }

    #[test]
    fn test_no_marks_for_zero_interval() {
        let config = LayoutConfig {
            mark_interval: 0.0,
            ..Default::default()
        };
        let layout = DashboardLayout::build(&config, &dataset());
        assert!(layout.payload_slider.marks.is_empty());
    }
}
