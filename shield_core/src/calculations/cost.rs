//! Cost versus dose reduction.
//!
//! Compares the unshielded dose with the shielded one and relates the
//! reduction to the price of the stack. Prices come from the layer itself
//! when set, otherwise from the material catalog.

use serde::{Deserialize, Serialize};

use super::attenuation::{dose, ShieldLayer};
use crate::materials::{unit_cost, CoefficientTable, RadiationType};

/// Result of a cost analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysis {
    /// Dose without any shielding
    pub dose_unshielded: f64,
    /// Dose with the given stack
    pub dose_shielded: f64,
    /// dose_unshielded − dose_shielded
    pub dose_reduction: f64,
    /// Σ cost_per_cm · thickness over layers with thickness > 0
    pub total_cost: f64,
    /// Reduction per cost unit; `None` when the stack costs nothing
    pub benefit_per_cost: Option<f64>,
}

/// Price of a single layer (0 for empty layers)
pub fn layer_cost(layer: &ShieldLayer) -> f64 {
    if !layer.is_present() {
        return 0.0;
    }
    let per_cm = layer
        .cost_per_cm
        .unwrap_or_else(|| unit_cost(&layer.material));
    per_cm * layer.thickness_cm
}

/// Compare shielded and unshielded dose against the stack's price
pub fn cost_analysis(
    table: &CoefficientTable,
    k: f64,
    r_m: f64,
    layers: &[ShieldLayer],
    radiation_type: RadiationType,
) -> CostAnalysis {
    let dose_unshielded = dose(table, k, r_m, &[], radiation_type);
    let dose_shielded = dose(table, k, r_m, layers, radiation_type);
    let dose_reduction = dose_unshielded - dose_shielded;
    let total_cost: f64 = layers.iter().map(layer_cost).sum();
    let benefit_per_cost = (total_cost > 0.0).then(|| dose_reduction / total_cost);

    CostAnalysis {
        dose_unshielded,
        dose_shielded,
        dose_reduction,
        total_cost,
        benefit_per_cost,
    }
}
