//! # Shielding Calculations
//!
//! Each calculation is a pure function over its inputs and an immutable
//! [`CoefficientTable`]:
//!
//! - [`attenuation`] - optical depth, dose at a point, dose-vs-distance curve
//! - [`zone`] - green/yellow/red classification
//! - [`thickness`] - single-material thickness needed to reach `D_safe`
//! - [`hazards`] - dangerous material combinations
//! - [`cost`] - price of a stack against the dose it removes
//!
//! [`calculate`] bundles all of them for one [`SimulationInput`], following
//! the `*Input` / `*Result` / `calculate(input)` pattern.

pub mod attenuation;
pub mod cost;
pub mod hazards;
pub mod thickness;
pub mod zone;

use serde::{Deserialize, Serialize};

pub use attenuation::{
    attenuation_breakdown, dose, dose_curve, optical_depth, AttenuationBreakdown, DoseCurve,
    ShieldLayer, MIN_DISTANCE_M,
};
pub use cost::{cost_analysis, CostAnalysis};
pub use hazards::{detect_hazards, HazardDetector, HazardRule};
pub use thickness::{recommend_thickness, ThicknessOutcome, ThicknessRecommendation};
pub use zone::{classify_zone, Zone};

use crate::errors::{SimError, SimResult};
use crate::materials::{CoefficientTable, RadiationType};

fn default_language() -> String {
    "EN".to_string()
}

/// Input parameters for one simulation point.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Lab bench",
///   "k": 1.0,
///   "r_m": 2.0,
///   "d_safe": 0.2,
///   "radiation_type": "gamma",
///   "layers": [
///     { "material": "Lead", "thickness_cm": 1.0 },
///     { "material": "Concrete", "thickness_cm": 10.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// User label for this scenario
    #[serde(default)]
    pub label: String,

    /// Source strength (relative units)
    pub k: f64,

    /// Distance from the source (m)
    pub r_m: f64,

    /// Safety threshold bounding the green zone
    pub d_safe: f64,

    /// Radiation type
    #[serde(default)]
    pub radiation_type: RadiationType,

    /// Shield stack, outermost first
    #[serde(default)]
    pub layers: Vec<ShieldLayer>,

    /// Language code for hazard messages
    #[serde(default = "default_language")]
    pub language: String,
}

impl SimulationInput {
    /// Validate input parameters.
    ///
    /// Only rejects values no calculation can use: non-finite numbers and a
    /// non-positive safety threshold. Zero or negative `k`, `r_m` and
    /// thicknesses are handled by the engine itself.
    pub fn validate(&self) -> SimResult<()> {
        if !self.k.is_finite() {
            return Err(SimError::invalid_input(
                "k",
                self.k.to_string(),
                "Source strength must be finite",
            ));
        }
        if !self.r_m.is_finite() {
            return Err(SimError::invalid_input(
                "r_m",
                self.r_m.to_string(),
                "Distance must be finite",
            ));
        }
        if !self.d_safe.is_finite() || self.d_safe <= 0.0 {
            return Err(SimError::invalid_input(
                "d_safe",
                self.d_safe.to_string(),
                "Safety threshold must be positive",
            ));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if !layer.thickness_cm.is_finite() {
                return Err(SimError::invalid_input(
                    format!("layers[{}].thickness_cm", i),
                    layer.thickness_cm.to_string(),
                    "Thickness must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// Results for one simulation point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Dose at `r_m` with the stack in place
    pub dose: f64,

    /// Zone of that dose
    pub zone: Zone,

    /// Per-layer optical depth
    pub attenuation: AttenuationBreakdown,

    /// Single-material thickness recommendations
    pub recommendation: ThicknessRecommendation,

    /// Hazard warnings, in rule order
    pub hazards: Vec<String>,

    /// Cost versus dose reduction
    pub cost: CostAnalysis,
}

impl SimulationResult {
    /// Check if the point is in the green zone
    pub fn passes(&self) -> bool {
        self.zone.is_safe()
    }
}

/// Run every calculation for one input.
///
/// # Returns
///
/// * `Ok(SimulationResult)` - Calculation results
/// * `Err(SimError)` - If inputs are invalid
pub fn calculate(
    input: &SimulationInput,
    table: &CoefficientTable,
    detector: &HazardDetector,
) -> SimResult<SimulationResult> {
    input.validate()?;

    let rt = input.radiation_type;
    let dose = attenuation::dose(table, input.k, input.r_m, &input.layers, rt);

    Ok(SimulationResult {
        dose,
        zone: classify_zone(dose, input.d_safe),
        attenuation: attenuation_breakdown(table, &input.layers, rt),
        recommendation: recommend_thickness(table, input.k, input.r_m, input.d_safe, rt),
        hazards: detector.detect(&input.layers, &input.language),
        cost: cost_analysis(table, input.k, input.r_m, &input.layers, rt),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{LEAD, WATER};

    fn test_input() -> SimulationInput {
        SimulationInput {
            label: "Test".to_string(),
            k: 1.0,
            r_m: 2.0,
            d_safe: 0.2,
            radiation_type: RadiationType::Gamma,
            layers: vec![ShieldLayer::new(LEAD, 1.0), ShieldLayer::new(WATER, 2.0)],
            language: "EN".to_string(),
        }
    }

    #[test]
    fn test_calculation_bundle() {
        let table = CoefficientTable::builtin();
        let result = calculate(&test_input(), &table, &HazardDetector::default()).unwrap();

        // exp(-(1.2 + 0.6)) / 4
        assert!((result.dose - (-1.8f64).exp() / 4.0).abs() < 1e-12);
        assert_eq!(result.zone, Zone::Green);
        assert!(result.passes());
        assert_eq!(result.attenuation.terms.len(), 2);
        assert_eq!(result.hazards.len(), 1);
        assert!(result.recommendation.shielding_needed());
    }

    #[test]
    fn test_invalid_threshold() {
        let mut input = test_input();
        input.d_safe = 0.0;
        let err = calculate(&input, &CoefficientTable::builtin(), &HazardDetector::default())
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_non_finite_thickness_rejected() {
        let mut input = test_input();
        input.layers[1].thickness_cm = f64::INFINITY;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_degenerate_physics_accepted() {
        let mut input = test_input();
        input.k = 0.0;
        input.r_m = 0.0;
        let result =
            calculate(&input, &CoefficientTable::builtin(), &HazardDetector::default()).unwrap();
        assert_eq!(result.dose, 0.0);
        assert_eq!(result.recommendation, ThicknessRecommendation::Undefined);
    }

    #[test]
    fn test_input_defaults_from_json() {
        let json = r#"{ "k": 1.0, "r_m": 2.0, "d_safe": 0.2 }"#;
        let input: SimulationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.radiation_type, RadiationType::Gamma);
        assert!(input.layers.is_empty());
        assert_eq!(input.language, "EN");
    }
}
