//! # Attenuation
//!
//! Point-source dose with exponential shielding:
//!
//! ```text
//! D = k · exp(−τ) / r²        τ = Σ μᵢ · xᵢ
//! ```
//!
//! ## Assumptions
//!
//! - No build-up factors, no spectral hardening: μ is a single scalar per
//!   (radiation type, material)
//! - Layer order does not change τ; it is kept only for display
//! - Distances at or below zero are clamped to [`MIN_DISTANCE_M`]
//! - Negative thicknesses count as zero
//!
//! ## Example
//!
//! ```rust
//! use shield_core::calculations::attenuation::{dose, ShieldLayer};
//! use shield_core::materials::{CoefficientTable, RadiationType, LEAD};
//!
//! let table = CoefficientTable::builtin();
//! let layers = vec![ShieldLayer::new(LEAD, 2.0)];
//!
//! let d = dose(&table, 1.0, 2.0, &layers, RadiationType::Gamma);
//! assert!(d < 1.0 / 4.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::materials::{CoefficientTable, RadiationType};

/// Smallest distance used in dose calculations (m)
pub const MIN_DISTANCE_M: f64 = 1e-3;

/// One layer of a shield stack.
///
/// ## JSON Example
///
/// ```json
/// { "material": "Lead", "thickness_cm": 2.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldLayer {
    /// Material name (see [`crate::materials::CATALOG`])
    pub material: String,

    /// Layer thickness in centimetres
    pub thickness_cm: f64,

    /// Optional price override per centimetre, used only by cost analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_cm: Option<f64>,
}

impl ShieldLayer {
    /// Create a layer priced from the catalog
    pub fn new(material: impl Into<String>, thickness_cm: f64) -> Self {
        ShieldLayer {
            material: material.into(),
            thickness_cm,
            cost_per_cm: None,
        }
    }

    /// Set a custom price per centimetre (builder pattern)
    pub fn with_cost(mut self, cost_per_cm: f64) -> Self {
        self.cost_per_cm = Some(cost_per_cm);
        self
    }

    /// Thickness used by the engine: negative (and NaN) values become 0
    pub fn effective_thickness_cm(&self) -> f64 {
        self.thickness_cm.max(0.0)
    }

    /// Whether the layer physically exists (thickness > 0)
    pub fn is_present(&self) -> bool {
        self.thickness_cm > 0.0
    }
}

/// Clamp a distance away from zero
pub fn clamp_distance(r_m: f64) -> f64 {
    if r_m <= 0.0 {
        MIN_DISTANCE_M
    } else {
        r_m
    }
}

/// Total optical depth τ = Σ μ·x over all layers
pub fn optical_depth(
    table: &CoefficientTable,
    layers: &[ShieldLayer],
    radiation_type: RadiationType,
) -> f64 {
    layers
        .iter()
        .map(|layer| {
            table.resolve(&layer.material, radiation_type) * layer.effective_thickness_cm()
        })
        .sum()
}

/// Dose rate at distance `r_m` from a source of strength `k`.
///
/// Never fails: `r_m <= 0` is clamped, `k <= 0` simply yields a
/// non-positive dose.
pub fn dose(
    table: &CoefficientTable,
    k: f64,
    r_m: f64,
    layers: &[ShieldLayer],
    radiation_type: RadiationType,
) -> f64 {
    let tau = optical_depth(table, layers, radiation_type);
    dose_from_depth(k, r_m, tau)
}

fn dose_from_depth(k: f64, r_m: f64, tau: f64) -> f64 {
    let r = clamp_distance(r_m);
    k * (-tau).exp() / (r * r)
}

/// Sampled dose-vs-distance curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseCurve {
    /// Sample distances (m), ascending
    pub r_m: Vec<f64>,
    /// Dose at each sample distance
    pub dose: Vec<f64>,
}

impl DoseCurve {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.r_m.len()
    }

    /// Whether the curve has no samples
    pub fn is_empty(&self) -> bool {
        self.r_m.is_empty()
    }

    /// Iterate (r, D) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.r_m.iter().copied().zip(self.dose.iter().copied())
    }
}

/// Sample the dose at `samples` evenly spaced distances.
///
/// Both ends are clamped to [`MIN_DISTANCE_M`] and included. If the range is
/// given backwards the endpoints are swapped so the distances always ascend,
/// unlike a plain linear space from `r_min_m` to `r_max_m`, which would
/// descend.
pub fn dose_curve(
    table: &CoefficientTable,
    k: f64,
    layers: &[ShieldLayer],
    r_min_m: f64,
    r_max_m: f64,
    samples: usize,
    radiation_type: RadiationType,
) -> DoseCurve {
    let a = r_min_m.max(MIN_DISTANCE_M);
    let b = r_max_m.max(MIN_DISTANCE_M);
    let (start, end) = if b < a { (b, a) } else { (a, b) };

    let r_m = linspace(start, end, samples);
    let tau = optical_depth(table, layers, radiation_type);
    let dose = r_m.iter().map(|&r| dose_from_depth(k, r, tau)).collect();

    DoseCurve { r_m, dose }
}

fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Contribution of one layer to the optical depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttenuationTerm {
    /// Material name
    pub material: String,
    /// Resolved coefficient μ (1/cm)
    pub mu: f64,
    /// Layer thickness (cm)
    pub thickness_cm: f64,
    /// μ · thickness
    pub contribution: f64,
}

/// Per-layer breakdown of the optical depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttenuationBreakdown {
    /// Terms for layers with thickness > 0, in stack order
    pub terms: Vec<AttenuationTerm>,
    /// Total optical depth τ
    pub optical_depth: f64,
    /// Transmitted fraction exp(−τ)
    pub transmission: f64,
}

/// Break τ down by layer
pub fn attenuation_breakdown(
    table: &CoefficientTable,
    layers: &[ShieldLayer],
    radiation_type: RadiationType,
) -> AttenuationBreakdown {
    let terms: Vec<AttenuationTerm> = layers
        .iter()
        .filter(|layer| layer.is_present())
        .map(|layer| {
            let mu = table.resolve(&layer.material, radiation_type);
            AttenuationTerm {
                material: layer.material.clone(),
                mu,
                thickness_cm: layer.thickness_cm,
                contribution: mu * layer.thickness_cm,
            }
        })
        .collect();
    let optical_depth: f64 = terms.iter().map(|t| t.contribution).sum();

    AttenuationBreakdown {
        terms,
        optical_depth,
        transmission: (-optical_depth).exp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{CONCRETE, LEAD, STEEL, WATER};

    const TOL: f64 = 1e-12;

    #[test]
    fn test_unshielded_inverse_square() {
        let table = CoefficientTable::builtin();
        let d = dose(&table, 2.0, 4.0, &[], RadiationType::Gamma);
        assert!((d - 2.0 / 16.0).abs() < TOL);
    }

    #[test]
    fn test_single_layer() {
        let table = CoefficientTable::builtin();
        let layers = vec![ShieldLayer::new(LEAD, 1.0)];
        // exp(-1.2) / 4
        let d = dose(&table, 1.0, 2.0, &layers, RadiationType::Gamma);
        assert!((d - (-1.2f64).exp() / 4.0).abs() < TOL);
    }

    #[test]
    fn test_layer_order_irrelevant() {
        let table = CoefficientTable::builtin();
        let forward = vec![
            ShieldLayer::new(LEAD, 1.0),
            ShieldLayer::new(CONCRETE, 10.0),
            ShieldLayer::new(WATER, 5.0),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        let a = dose(&table, 1.0, 1.5, &forward, RadiationType::Neutron);
        let b = dose(&table, 1.0, 1.5, &reversed, RadiationType::Neutron);
        assert!((a - b).abs() < TOL);
    }

    #[test]
    fn test_zero_distance_clamped() {
        let table = CoefficientTable::builtin();
        let d = dose(&table, 1.0, 0.0, &[], RadiationType::Gamma);
        assert!(d.is_finite());
        assert!((d - 1.0 / (MIN_DISTANCE_M * MIN_DISTANCE_M)).abs() < 1e-3);
        assert_eq!(d, dose(&table, 1.0, -3.0, &[], RadiationType::Gamma));
    }

    #[test]
    fn test_negative_thickness_clamped() {
        let table = CoefficientTable::builtin();
        let layers = vec![ShieldLayer::new(STEEL, -5.0)];
        let d = dose(&table, 1.0, 1.0, &layers, RadiationType::Gamma);
        assert!((d - 1.0).abs() < TOL);
    }

    #[test]
    fn test_non_positive_source() {
        let table = CoefficientTable::builtin();
        assert_eq!(dose(&table, 0.0, 1.0, &[], RadiationType::Gamma), 0.0);
        assert!(dose(&table, -1.0, 1.0, &[], RadiationType::Gamma) < 0.0);
    }

    #[test]
    fn test_unknown_material_passes_through() {
        let table = CoefficientTable::builtin();
        let layers = vec![ShieldLayer::new("Cardboard", 100.0)];
        let d = dose(&table, 1.0, 1.0, &layers, RadiationType::Gamma);
        assert!((d - 1.0).abs() < TOL);
    }

    #[test]
    fn test_dose_curve_samples() {
        let table = CoefficientTable::builtin();
        let layers = vec![ShieldLayer::new(WATER, 3.0)];
        let curve = dose_curve(&table, 1.0, &layers, 0.1, 10.0, 400, RadiationType::Gamma);

        assert_eq!(curve.len(), 400);
        assert_eq!(curve.dose.len(), 400);
        assert_eq!(curve.r_m[0], 0.1);
        assert_eq!(curve.r_m[399], 10.0);
        assert!(curve.r_m.windows(2).all(|w| w[0] < w[1]));
        for (r, d) in curve.points() {
            let expected = dose(&table, 1.0, r, &layers, RadiationType::Gamma);
            assert!((d - expected).abs() < TOL);
        }
    }

    #[test]
    fn test_dose_curve_clamps_and_orders() {
        let table = CoefficientTable::builtin();
        let curve = dose_curve(&table, 1.0, &[], 5.0, -1.0, 3, RadiationType::Gamma);
        assert_eq!(curve.r_m[0], MIN_DISTANCE_M);
        assert_eq!(curve.r_m[2], 5.0);
        assert!(curve.r_m.windows(2).all(|w| w[0] < w[1]));

        let forward = dose_curve(&table, 1.0, &[], 1.0, 5.0, 9, RadiationType::Gamma);
        let backward = dose_curve(&table, 1.0, &[], 5.0, 1.0, 9, RadiationType::Gamma);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_dose_curve_degenerate_counts() {
        let table = CoefficientTable::builtin();
        assert!(dose_curve(&table, 1.0, &[], 1.0, 2.0, 0, RadiationType::Gamma).is_empty());
        let single = dose_curve(&table, 1.0, &[], 1.0, 2.0, 1, RadiationType::Gamma);
        assert_eq!(single.r_m, vec![1.0]);
    }

    #[test]
    fn test_dose_curve_is_restartable() {
        let table = CoefficientTable::builtin();
        let layers = vec![ShieldLayer::new(LEAD, 0.5)];
        let a = dose_curve(&table, 3.0, &layers, 0.5, 4.0, 50, RadiationType::Beta);
        let b = dose_curve(&table, 3.0, &layers, 0.5, 4.0, 50, RadiationType::Beta);
        assert_eq!(a, b);
    }

    #[test]
    fn test_breakdown_skips_empty_layers() {
        let table = CoefficientTable::builtin();
        let layers = vec![
            ShieldLayer::new(LEAD, 1.0),
            ShieldLayer::new(STEEL, 0.0),
            ShieldLayer::new(WATER, 2.0),
        ];
        let breakdown = attenuation_breakdown(&table, &layers, RadiationType::Gamma);

        assert_eq!(breakdown.terms.len(), 2);
        assert_eq!(breakdown.terms[1].material, WATER);
        assert!((breakdown.optical_depth - 1.8).abs() < TOL);
        assert!((breakdown.transmission - (-1.8f64).exp()).abs() < TOL);
        assert!(
            (breakdown.optical_depth - optical_depth(&table, &layers, RadiationType::Gamma)).abs()
                < TOL
        );
    }

    #[test]
    fn test_layer_serialization() {
        let layer = ShieldLayer::new(LEAD, 2.0);
        let json = serde_json::to_string(&layer).unwrap();
        assert!(!json.contains("cost_per_cm"));
        let parsed: ShieldLayer =
            serde_json::from_str(r#"{"material":"Lead","thickness_cm":2.0}"#).unwrap();
        assert_eq!(parsed, layer);
    }
}
