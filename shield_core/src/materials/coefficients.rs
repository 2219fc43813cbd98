//! Attenuation Coefficient Tables
//!
//! A [`CoefficientTable`] is built once from an immutable base table and an
//! optional user override, then shared read-only by every calculation.
//!
//! ## Merge Rule
//!
//! The override wins per leaf key. Overriding the gamma μ of lead leaves the
//! gamma μ of every other material untouched.
//!
//! ## Override Document
//!
//! Override files are a two-level JSON object keyed by radiation type, then
//! by material name:
//!
//! ```json
//! {
//!   "gamma": { "Lead": 1.5, "Water": "0.32" },
//!   "neutron": { "Water": 0.7 }
//! }
//! ```
//!
//! Leaves that are not non-negative finite numbers (or numeric strings) are
//! dropped one by one; the rest of the document still applies.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing::debug;

use super::radiation::RadiationType;
use super::{material_names, CONCRETE, GLASS_ACRYLIC, LEAD, STEEL, WATER};

/// Two-level coefficient mapping: radiation type → material → μ (1/cm)
pub type CoefficientMap = BTreeMap<RadiationType, BTreeMap<String, f64>>;

/// Built-in coefficients (relative, educational values)
pub static BASE_COEFFICIENTS: Lazy<CoefficientMap> = Lazy::new(|| {
    let mut map = CoefficientMap::new();
    map.insert(
        RadiationType::Gamma,
        column(&[
            (LEAD, 1.20),
            (STEEL, 0.80),
            (CONCRETE, 0.35),
            (WATER, 0.30),
            (GLASS_ACRYLIC, 0.15),
        ]),
    );
    map.insert(
        RadiationType::Beta,
        column(&[
            (LEAD, 2.00),
            (STEEL, 2.50),
            (CONCRETE, 3.00),
            (WATER, 3.50),
            (GLASS_ACRYLIC, 4.00),
        ]),
    );
    map.insert(
        RadiationType::Alpha,
        column(&[
            (LEAD, 50.0),
            (STEEL, 50.0),
            (CONCRETE, 40.0),
            (WATER, 30.0),
            (GLASS_ACRYLIC, 45.0),
        ]),
    );
    map.insert(
        RadiationType::Neutron,
        column(&[
            (LEAD, 0.10),
            (STEEL, 0.15),
            (CONCRETE, 0.45),
            (WATER, 0.60),
            (GLASS_ACRYLIC, 0.25),
        ]),
    );
    map
});

fn column(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, mu)| (name.to_string(), *mu))
        .collect()
}

/// Active coefficient lookup table.
///
/// Holds the base table, the generic per-material fallback (the base gamma
/// column) and the merged active table. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    base: CoefficientMap,
    generic: BTreeMap<String, f64>,
    active: CoefficientMap,
}

impl CoefficientTable {
    /// Built-in coefficients with no override applied
    pub fn builtin() -> Self {
        Self::with_overrides(&CoefficientMap::new())
    }

    /// Built-in coefficients with `overrides` merged on top
    pub fn with_overrides(overrides: &CoefficientMap) -> Self {
        Self::new(BASE_COEFFICIENTS.clone(), overrides)
    }

    /// Build a table from an arbitrary base and override.
    ///
    /// The generic fallback is the base gamma column (empty if the base has
    /// no gamma entries).
    pub fn new(base: CoefficientMap, overrides: &CoefficientMap) -> Self {
        let generic = base
            .get(&RadiationType::Gamma)
            .cloned()
            .unwrap_or_default();
        let active = merge_overrides(&base, overrides);
        debug!(
            base_entries = count_leaves(&base),
            override_entries = count_leaves(overrides),
            "coefficient table built"
        );
        CoefficientTable {
            base,
            generic,
            active,
        }
    }

    /// Resolve μ for a material under a radiation type.
    ///
    /// Falls back to the generic column when the radiation type has no
    /// entries at all; unknown materials resolve to 0.
    pub fn resolve(&self, material: &str, radiation_type: RadiationType) -> f64 {
        let column = self.active.get(&radiation_type).unwrap_or(&self.generic);
        column.get(material).copied().unwrap_or(0.0)
    }

    /// The merged active table
    pub fn active(&self) -> &CoefficientMap {
        &self.active
    }

    /// The base table the override was merged onto
    pub fn base(&self) -> &CoefficientMap {
        &self.base
    }

    /// Material names known to this table.
    ///
    /// Catalog materials come first in display order, followed by any extra
    /// names found in the active table, sorted.
    pub fn materials(&self) -> Vec<String> {
        let mut names: Vec<String> = material_names().map(str::to_string).collect();
        let mut extra: Vec<&String> = self
            .active
            .values()
            .flat_map(|column| column.keys())
            .chain(self.generic.keys())
            .filter(|name| !names.contains(*name))
            .collect();
        extra.sort();
        extra.dedup();
        names.extend(extra.into_iter().cloned());
        names
    }

    /// Match user-typed text against the known material names.
    ///
    /// Surrounding whitespace and letter case are ignored; the stored
    /// spelling is returned. `None` means the name would resolve to μ = 0.
    pub fn canonical_name(&self, name: &str) -> Option<String> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.materials()
            .into_iter()
            .find(|known| known.to_lowercase() == wanted)
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        CoefficientTable::builtin()
    }
}

/// Merge `overrides` over `base`, leaf by leaf.
///
/// Every (type, material) pair in the override replaces the base value;
/// everything else keeps its base value. Negative or non-finite override
/// values are skipped.
pub fn merge_overrides(base: &CoefficientMap, overrides: &CoefficientMap) -> CoefficientMap {
    let mut active = base.clone();
    for (radiation_type, column) in overrides {
        for (material, &mu) in column {
            if !is_valid_coefficient(mu) {
                debug!(%material, ?radiation_type, mu, "skipping invalid override value");
                continue;
            }
            active
                .entry(*radiation_type)
                .or_default()
                .insert(material.clone(), mu);
        }
    }
    active
}

/// Parse an already-decoded override document.
///
/// Anything that is not an object of objects is treated as an empty
/// override. Unknown radiation-type keys drop their whole column; malformed
/// leaves are dropped individually.
pub fn parse_override_document(doc: &Value) -> CoefficientMap {
    let mut overrides = CoefficientMap::new();
    let Some(types) = doc.as_object() else {
        debug!("override document is not an object; ignoring");
        return overrides;
    };

    for (type_key, column) in types {
        let radiation_type = match RadiationType::from_str_flexible(type_key) {
            Ok(rt) => rt,
            Err(_) => {
                debug!(type_key = %type_key, "skipping unknown radiation type in override");
                continue;
            }
        };
        let Some(leaves) = column.as_object() else {
            debug!(type_key = %type_key, "override column is not an object; skipping");
            continue;
        };
        for (material, leaf) in leaves {
            match coerce_coefficient(leaf) {
                Some(mu) => {
                    overrides
                        .entry(radiation_type)
                        .or_default()
                        .insert(material.clone(), mu);
                }
                None => {
                    debug!(
                        type_key = %type_key,
                        %material,
                        value = %leaf,
                        "dropping malformed override entry"
                    );
                }
            }
        }
    }
    overrides
}

/// Render a coefficient map as an override document.
///
/// Negative values are clamped to 0, matching what the coefficient editor
/// writes to disk.
pub fn to_override_document(map: &CoefficientMap) -> Value {
    let mut doc = Map::new();
    for (radiation_type, column) in map {
        let leaves: Map<String, Value> = column
            .iter()
            .filter(|(_, mu)| mu.is_finite())
            .map(|(material, mu)| (material.clone(), Value::from(mu.max(0.0))))
            .collect();
        doc.insert(radiation_type.code().to_string(), Value::Object(leaves));
    }
    Value::Object(doc)
}

fn coerce_coefficient(leaf: &Value) -> Option<f64> {
    let mu = match leaf {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    is_valid_coefficient(mu).then_some(mu)
}

fn is_valid_coefficient(mu: f64) -> bool {
    mu.is_finite() && mu >= 0.0
}

fn count_leaves(map: &CoefficientMap) -> usize {
    map.values().map(BTreeMap::len).sum()
}
