//! Coefficient Presets
//!
//! One-click starting points for the coefficient editor. Each preset starts
//! from the base table and rescales one or two radiation columns; the result
//! is a complete override document ready to be saved.

use serde::{Deserialize, Serialize};

use super::coefficients::CoefficientMap;
use super::radiation::RadiationType;
use super::{CONCRETE, GLASS_ACRYLIC, LEAD, STEEL, WATER};
use crate::errors::{SimError, SimResult};

/// Named coefficient preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientPreset {
    /// Factory defaults, unchanged
    Default,
    /// Favour dense metals against gamma
    Gamma,
    /// Favour hydrogen-rich materials against neutrons
    Neutron,
    /// Favour low-Z materials against beta
    Beta,
    /// Double alpha stopping power (also applies the neutron adjustment)
    Alpha,
}

impl CoefficientPreset {
    /// All presets for UI selection
    pub const ALL: [CoefficientPreset; 5] = [
        CoefficientPreset::Default,
        CoefficientPreset::Gamma,
        CoefficientPreset::Neutron,
        CoefficientPreset::Beta,
        CoefficientPreset::Alpha,
    ];

    /// Parse from a preset name
    pub fn from_str_flexible(s: &str) -> SimResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" | "factory" => Ok(CoefficientPreset::Default),
            "gamma" => Ok(CoefficientPreset::Gamma),
            "neutron" | "neutrons" => Ok(CoefficientPreset::Neutron),
            "beta" => Ok(CoefficientPreset::Beta),
            "alpha" => Ok(CoefficientPreset::Alpha),
            _ => Err(SimError::invalid_input("preset", s, "Unknown coefficient preset")),
        }
    }

    /// Build the preset table from `base`.
    ///
    /// Scaled values are rounded to three decimals.
    pub fn apply(&self, base: &CoefficientMap) -> CoefficientMap {
        let mut table = base.clone();
        match self {
            CoefficientPreset::Default => {}
            CoefficientPreset::Gamma => {
                scale_column(&mut table, RadiationType::Gamma, &[LEAD, STEEL], 1.25, 0.9);
            }
            CoefficientPreset::Neutron => {
                scale_neutron(&mut table);
            }
            CoefficientPreset::Beta => {
                scale_column(
                    &mut table,
                    RadiationType::Beta,
                    &[GLASS_ACRYLIC, WATER, CONCRETE],
                    1.25,
                    0.8,
                );
            }
            CoefficientPreset::Alpha => {
                scale_column(&mut table, RadiationType::Alpha, &[], 2.0, 2.0);
                scale_neutron(&mut table);
            }
        }
        table
    }
}

fn scale_neutron(table: &mut CoefficientMap) {
    scale_column(table, RadiationType::Neutron, &[WATER, CONCRETE], 1.3, 0.9);
}

/// Multiply `favoured` materials by `boost` and every other material by `other`
fn scale_column(
    table: &mut CoefficientMap,
    radiation_type: RadiationType,
    favoured: &[&str],
    boost: f64,
    other: f64,
) {
    if let Some(column) = table.get_mut(&radiation_type) {
        for (material, mu) in column.iter_mut() {
            let factor = if favoured.contains(&material.as_str()) {
                boost
            } else {
                other
            };
            *mu = round3(*mu * factor);
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
