//! # Materials Database
//!
//! Shielding material catalog, radiation types and the attenuation
//! coefficient tables that tie them together.
//!
//! Materials are identified by name. The five built-in materials carry an
//! advisory cost per centimetre of thickness; the engine never looks at the
//! cost, only the cost analysis does. Names that are not in the catalog are
//! still accepted everywhere: they resolve to μ = 0 (fully transparent).
//!
//! ## Example
//!
//! ```rust
//! use shield_core::materials::{CoefficientTable, RadiationType, LEAD};
//!
//! let table = CoefficientTable::builtin();
//! let mu = table.resolve(LEAD, RadiationType::Gamma);
//! assert!(mu > 0.0);
//! ```

pub mod coefficients;
pub mod presets;
pub mod radiation;

pub use coefficients::{
    merge_overrides, parse_override_document, to_override_document, CoefficientMap,
    CoefficientTable, BASE_COEFFICIENTS,
};
pub use presets::CoefficientPreset;
pub use radiation::RadiationType;

use serde::Serialize;

/// Lead
pub const LEAD: &str = "Lead";
/// Structural steel
pub const STEEL: &str = "Steel";
/// Ordinary concrete
pub const CONCRETE: &str = "Concrete";
/// Water
pub const WATER: &str = "Water";
/// Glass or acrylic sheet
pub const GLASS_ACRYLIC: &str = "Glass/Acrylic";

/// Unit cost applied to materials that are not in the catalog
pub const DEFAULT_COST_PER_CM: f64 = 10.0;

/// Catalog entry for a shielding material
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialInfo {
    /// Material identifier
    pub name: &'static str,
    /// Advisory cost per centimetre of thickness (relative units)
    pub cost_per_cm: f64,
}

/// Built-in materials in display order
pub const CATALOG: [MaterialInfo; 5] = [
    MaterialInfo {
        name: LEAD,
        cost_per_cm: 50.0,
    },
    MaterialInfo {
        name: STEEL,
        cost_per_cm: 35.0,
    },
    MaterialInfo {
        name: CONCRETE,
        cost_per_cm: 10.0,
    },
    MaterialInfo {
        name: WATER,
        cost_per_cm: 5.0,
    },
    MaterialInfo {
        name: GLASS_ACRYLIC,
        cost_per_cm: 20.0,
    },
];

/// Look up a catalog entry by exact name
pub fn find_material(name: &str) -> Option<&'static MaterialInfo> {
    CATALOG.iter().find(|m| m.name == name)
}

/// Cost per centimetre for a material, falling back to [`DEFAULT_COST_PER_CM`]
pub fn unit_cost(name: &str) -> f64 {
    find_material(name)
        .map(|m| m.cost_per_cm)
        .unwrap_or(DEFAULT_COST_PER_CM)
}

/// Names of the built-in materials in display order
pub fn material_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|m| m.name)
}
