//! Property-based tests for the dose engine using proptest.
//!
//! Covers: layer-order independence, inverse-square law, monotonicity in
//! thickness, zone boundaries, thickness recommendation round-trip.

use proptest::prelude::*;
use shield_core::calculations::{
    classify_zone, dose, dose_curve, recommend_thickness, ShieldLayer, ThicknessOutcome,
    ThicknessRecommendation, Zone,
};
use shield_core::materials::{material_names, CoefficientTable, RadiationType, CATALOG};

fn radiation_type() -> impl Strategy<Value = RadiationType> {
    prop::sample::select(RadiationType::ALL.to_vec())
}

fn material() -> impl Strategy<Value = String> {
    prop::sample::select(CATALOG.iter().map(|m| m.name.to_string()).collect::<Vec<_>>())
}

fn layer() -> impl Strategy<Value = ShieldLayer> {
    (material(), -2.0f64..20.0).prop_map(|(m, x)| ShieldLayer::new(m, x))
}

/// Relative comparison; values deep in the underflow range count as equal.
fn relative_eq(a: f64, b: f64) -> bool {
    if a.abs() < 1e-200 && b.abs() < 1e-200 {
        return true;
    }
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

// ── Attenuation ──────────────────────────────────────────────────────

proptest! {
    /// Reversing or rotating the stack never changes the dose.
    #[test]
    fn dose_independent_of_layer_order(
        layers in prop::collection::vec(layer(), 0..6),
        k in 0.01f64..100.0,
        r in 0.01f64..20.0,
        rt in radiation_type(),
    ) {
        let table = CoefficientTable::builtin();
        let base = dose(&table, k, r, &layers, rt);

        let mut reversed = layers.clone();
        reversed.reverse();
        prop_assert!(relative_eq(base, dose(&table, k, r, &reversed, rt)));

        if !layers.is_empty() {
            let mut rotated = layers.clone();
            rotated.rotate_left(1);
            prop_assert!(relative_eq(base, dose(&table, k, r, &rotated, rt)));
        }
    }

    /// No shielding gives the pure inverse-square law.
    #[test]
    fn unshielded_is_inverse_square(
        k in -10.0f64..100.0,
        r in 0.01f64..50.0,
        rt in radiation_type(),
    ) {
        let table = CoefficientTable::builtin();
        prop_assert!(relative_eq(dose(&table, k, r, &[], rt), k / (r * r)));
    }

    /// Adding thickness never increases the dose.
    #[test]
    fn dose_non_increasing_in_thickness(
        m in material(),
        x in 0.0f64..20.0,
        extra in 0.0f64..20.0,
        k in 0.01f64..100.0,
        r in 0.01f64..20.0,
        rt in radiation_type(),
    ) {
        let table = CoefficientTable::builtin();
        let thin = dose(&table, k, r, &[ShieldLayer::new(m.clone(), x)], rt);
        let thick = dose(&table, k, r, &[ShieldLayer::new(m, x + extra)], rt);
        prop_assert!(thick <= thin);
    }

    /// Curve distances ascend strictly and span the requested range.
    #[test]
    fn dose_curve_strictly_increasing(
        r_min in 0.01f64..5.0,
        span in 0.1f64..20.0,
        samples in 2usize..500,
    ) {
        let table = CoefficientTable::builtin();
        let r_max = r_min + span;
        let curve = dose_curve(&table, 1.0, &[], r_min, r_max, samples, RadiationType::Gamma);
        prop_assert_eq!(curve.r_m.len(), samples);
        prop_assert_eq!(curve.dose.len(), samples);
        prop_assert!(curve.r_m.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(curve.r_m[0], r_min);
        prop_assert_eq!(curve.r_m[samples - 1], r_max);
    }
}

// ── Zones ────────────────────────────────────────────────────────────

proptest! {
    /// Band edges belong to the safer zone.
    #[test]
    fn zone_boundaries(d_safe in 1e-6f64..1e6) {
        prop_assert_eq!(classify_zone(d_safe, d_safe), Zone::Green);
        prop_assert_eq!(classify_zone(3.0 * d_safe, d_safe), Zone::Yellow);
        let above = 3.0 * d_safe * (1.0 + 1e-9);
        prop_assert_eq!(classify_zone(above, d_safe), Zone::Red);
    }
}

// ── Thickness recommendation ─────────────────────────────────────────

proptest! {
    /// The recommended thickness just meets the threshold.
    #[test]
    fn recommendation_round_trip(
        k in 1.0f64..1000.0,
        r in 0.1f64..5.0,
        d_safe in 1e-4f64..0.5,
        rt in radiation_type(),
    ) {
        let table = CoefficientTable::builtin();
        let rec = recommend_thickness(&table, k, r, d_safe, rt);

        for row in rec.rows() {
            if let ThicknessOutcome::Finite(x) = row.outcome {
                let at = dose(&table, k, r, &[ShieldLayer::new(row.material.clone(), x)], rt);
                prop_assert!(at <= d_safe * (1.0 + 1e-9));

                let delta = (x * 1e-3).max(1e-6);
                if x > delta {
                    let thinner = [ShieldLayer::new(row.material.clone(), x - delta)];
                    let below = dose(&table, k, r, &thinner, rt);
                    prop_assert!(below > d_safe);
                }
            }
        }
    }

    /// When the unshielded dose is already safe every material gets zero.
    #[test]
    fn satisfied_target_gives_zero(
        k in 0.01f64..1.0,
        r in 1.0f64..10.0,
        rt in radiation_type(),
    ) {
        // target = d_safe · r² / k >= 1
        let d_safe = k / (r * r) * 1.5;
        let table = CoefficientTable::builtin();
        let rec = recommend_thickness(&table, k, r, d_safe, rt);
        prop_assert_eq!(rec.rows().len(), material_names().count());
        for row in rec.rows() {
            prop_assert_eq!(row.outcome, ThicknessOutcome::Zero);
        }
    }

    /// Non-positive source strength has no recommendation at all.
    #[test]
    fn non_positive_source_undefined(k in -100.0f64..=0.0, rt in radiation_type()) {
        let table = CoefficientTable::builtin();
        prop_assert_eq!(
            recommend_thickness(&table, k, 1.0, 0.2, rt),
            ThicknessRecommendation::Undefined
        );
    }
}
