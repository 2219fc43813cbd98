//! # Simulator Settings
//!
//! Defaults for the simulation parameters, the dose curve and the data files
//! the front end reads. Settings are stored as JSON; every field is optional
//! and falls back to its default.
//!
//! ## Example
//!
//! ```rust
//! use shield_core::config::SimulatorSettings;
//!
//! let settings: SimulatorSettings = serde_json::from_str(r#"{ "k": 3.0 }"#).unwrap();
//! assert_eq!(settings.k, 3.0);
//! assert_eq!(settings.d_safe, 0.2);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calculations::{ShieldLayer, SimulationInput};
use crate::errors::{SimError, SimResult};
use crate::materials::RadiationType;

/// Settings for one simulator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Source strength (relative units)
    pub k: f64,

    /// Current distance from the source (m)
    pub r_m: f64,

    /// Safety threshold bounding the green zone
    pub d_safe: f64,

    /// Radiation type selected at start-up
    pub radiation_type: RadiationType,

    /// Language code for messages ("EN", "RU", ...)
    pub language: String,

    /// Dose curve sampling
    pub curve: CurveSettings,

    /// Data file locations
    pub paths: DataPaths,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        SimulatorSettings {
            k: 1.0,
            r_m: 2.0,
            d_safe: 0.2,
            radiation_type: RadiationType::Gamma,
            language: "EN".to_string(),
            curve: CurveSettings::default(),
            paths: DataPaths::default(),
        }
    }
}

impl SimulatorSettings {
    /// Validate settings.
    pub fn validate(&self) -> SimResult<()> {
        for (field, value) in [("k", self.k), ("r_m", self.r_m)] {
            if !value.is_finite() {
                return Err(SimError::invalid_input(field, value.to_string(), "Must be finite"));
            }
        }
        if !self.d_safe.is_finite() || self.d_safe <= 0.0 {
            return Err(SimError::invalid_input(
                "d_safe",
                self.d_safe.to_string(),
                "Safety threshold must be positive",
            ));
        }
        self.curve.validate()
    }

    /// Build a simulation input for `layers` from these settings
    pub fn simulation_input(&self, layers: Vec<ShieldLayer>) -> SimulationInput {
        SimulationInput {
            label: String::new(),
            k: self.k,
            r_m: self.r_m,
            d_safe: self.d_safe,
            radiation_type: self.radiation_type,
            layers,
            language: self.language.clone(),
        }
    }
}

/// Dose curve sampling range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Nearest sampled distance (m)
    pub r_min_m: f64,

    /// Farthest sampled distance (m)
    pub r_max_m: f64,

    /// Number of samples
    pub samples: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        CurveSettings {
            r_min_m: 0.1,
            r_max_m: 10.0,
            samples: 400,
        }
    }
}

impl CurveSettings {
    /// Validate the sampling range
    pub fn validate(&self) -> SimResult<()> {
        if !self.r_min_m.is_finite() || !self.r_max_m.is_finite() {
            return Err(SimError::invalid_input(
                "curve",
                format!("{}..{}", self.r_min_m, self.r_max_m),
                "Curve range must be finite",
            ));
        }
        if self.r_max_m < self.r_min_m {
            return Err(SimError::invalid_input(
                "curve.r_max_m",
                self.r_max_m.to_string(),
                "Upper bound must not be below r_min_m",
            ));
        }
        if self.samples == 0 {
            return Err(SimError::invalid_input(
                "curve.samples",
                "0",
                "At least one sample is required",
            ));
        }
        Ok(())
    }
}

/// Where the front end finds its data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// User coefficient override document
    pub override_path: PathBuf,

    /// Question/answer corpus for the assistant
    pub corpus_path: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            override_path: PathBuf::from("data/mu_override.json"),
            corpus_path: PathBuf::from("data/qa.json"),
        }
    }
}
