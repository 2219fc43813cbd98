//! # Thickness Recommendation
//!
//! Inverts the attenuation model per material: how thick would a single
//! layer of this material have to be for the dose at `r` to drop to
//! `D_safe`?
//!
//! ```text
//! target = D_safe · r² / k          (required transmission exp(−μx))
//! x      = −ln(target) / μ
//! ```
//!
//! Each material is solved independently. This is not a multi-layer or
//! cost optimisation.
//!
//! ## Outcomes
//!
//! - `k ≤ 0`: [`ThicknessRecommendation::Undefined`] for the whole table
//! - `target ≥ 1`: [`ThicknessOutcome::Zero`] for every material
//! - `μ = 0` (or `target ≤ 0`): [`ThicknessOutcome::Unrepresentable`]
//! - otherwise [`ThicknessOutcome::Finite`]

use serde::{Deserialize, Serialize};

use super::attenuation::clamp_distance;
use crate::materials::{CoefficientTable, RadiationType};

/// Recommended thickness for one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "thickness_cm", rename_all = "snake_case")]
pub enum ThicknessOutcome {
    /// Already safe without shielding
    Zero,
    /// Required thickness in centimetres
    Finite(f64),
    /// No finite thickness of this material reaches the target
    Unrepresentable,
}

impl ThicknessOutcome {
    /// Thickness in cm, `None` when unrepresentable
    pub fn thickness_cm(&self) -> Option<f64> {
        match self {
            ThicknessOutcome::Zero => Some(0.0),
            ThicknessOutcome::Finite(x) => Some(*x),
            ThicknessOutcome::Unrepresentable => None,
        }
    }

    /// Table cell text: two decimals, or "—" when unrepresentable
    pub fn format_cm(&self) -> String {
        match self.thickness_cm() {
            Some(x) => format!("{:.2}", x),
            None => "—".to_string(),
        }
    }
}

impl std::fmt::Display for ThicknessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_cm())
    }
}

/// One row of the recommendation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecommendation {
    /// Material name
    pub material: String,
    /// Resolved μ used for the inversion
    pub mu: f64,
    /// Recommended thickness
    pub outcome: ThicknessOutcome,
}

/// Recommendation table for all materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThicknessRecommendation {
    /// Source strength is not positive; no inversion is meaningful
    Undefined,
    /// Per-material results
    Computed {
        /// Required transmission D_safe · r² / k
        target_transmission: f64,
        /// Rows in material order
        materials: Vec<MaterialRecommendation>,
    },
}

impl ThicknessRecommendation {
    /// Rows, empty when undefined
    pub fn rows(&self) -> &[MaterialRecommendation] {
        match self {
            ThicknessRecommendation::Undefined => &[],
            ThicknessRecommendation::Computed { materials, .. } => materials,
        }
    }

    /// Outcome for a single material
    pub fn get(&self, material: &str) -> Option<ThicknessOutcome> {
        self.rows()
            .iter()
            .find(|row| row.material == material)
            .map(|row| row.outcome)
    }

    /// True when the threshold is already met without shielding
    pub fn shielding_needed(&self) -> bool {
        match self {
            ThicknessRecommendation::Undefined => false,
            ThicknessRecommendation::Computed {
                target_transmission,
                ..
            } => *target_transmission < 1.0,
        }
    }
}

/// Invert a single material
pub fn thickness_for(mu: f64, target_transmission: f64) -> ThicknessOutcome {
    if target_transmission >= 1.0 {
        return ThicknessOutcome::Zero;
    }
    if mu <= 0.0 || !mu.is_finite() || target_transmission <= 0.0 || target_transmission.is_nan() {
        return ThicknessOutcome::Unrepresentable;
    }
    let x = (-target_transmission.ln() / mu).max(0.0);
    if x == 0.0 {
        ThicknessOutcome::Zero
    } else {
        ThicknessOutcome::Finite(x)
    }
}

/// Recommend a single-material thickness for every material in the table.
///
/// `r_m` is clamped the same way as in the dose calculation so that the
/// recommendation is consistent with [`super::attenuation::dose`].
pub fn recommend_thickness(
    table: &CoefficientTable,
    k: f64,
    r_m: f64,
    d_safe: f64,
    radiation_type: RadiationType,
) -> ThicknessRecommendation {
    if k <= 0.0 || k.is_nan() {
        return ThicknessRecommendation::Undefined;
    }

    let r = clamp_distance(r_m);
    let target_transmission = d_safe * r * r / k;

    let materials = table
        .materials()
        .into_iter()
        .map(|material| {
            let mu = table.resolve(&material, radiation_type);
            MaterialRecommendation {
                outcome: thickness_for(mu, target_transmission),
                material,
                mu,
            }
        })
        .collect();

    ThicknessRecommendation::Computed {
        target_transmission,
        materials,
    }
}
