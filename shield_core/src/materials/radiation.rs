//! Radiation Types
//!
//! The four radiation categories the simulator distinguishes. Each one
//! selects its own column of attenuation coefficients.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{SimError, SimResult};

/// Radiation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiationType {
    /// Gamma photons (γ)
    Gamma,
    /// Beta particles (β)
    Beta,
    /// Alpha particles (α)
    Alpha,
    /// Neutrons (n)
    Neutron,
}

impl RadiationType {
    /// All radiation types for UI selection
    pub const ALL: [RadiationType; 4] = [
        RadiationType::Gamma,
        RadiationType::Beta,
        RadiationType::Alpha,
        RadiationType::Neutron,
    ];

    /// Key used in override documents and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            RadiationType::Gamma => "gamma",
            RadiationType::Beta => "beta",
            RadiationType::Alpha => "alpha",
            RadiationType::Neutron => "neutron",
        }
    }

    /// Short symbol for charts and tables
    pub fn symbol(&self) -> &'static str {
        match self {
            RadiationType::Gamma => "γ",
            RadiationType::Beta => "β",
            RadiationType::Alpha => "α",
            RadiationType::Neutron => "n",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RadiationType::Gamma => "Gamma (γ)",
            RadiationType::Beta => "Beta (β)",
            RadiationType::Alpha => "Alpha (α)",
            RadiationType::Neutron => "Neutrons",
        }
    }

    /// Parse from common string representations.
    ///
    /// Accepts English names, Greek symbols and the Russian labels used by
    /// older override files.
    pub fn from_str_flexible(s: &str) -> SimResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "gamma" | "γ" | "g" | "гамма" => Ok(RadiationType::Gamma),
            "beta" | "β" | "b" | "бета" => Ok(RadiationType::Beta),
            "alpha" | "α" | "a" | "альфа" => Ok(RadiationType::Alpha),
            "neutron" | "neutrons" | "n" | "нейтроны" | "нейтрон" => {
                Ok(RadiationType::Neutron)
            }
            _ => Err(SimError::unknown_radiation_type(s)),
        }
    }
}

impl Default for RadiationType {
    fn default() -> Self {
        RadiationType::Gamma
    }
}

impl FromStr for RadiationType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RadiationType::from_str_flexible(s)
    }
}

impl std::fmt::Display for RadiationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_names() {
        assert_eq!(RadiationType::from_str_flexible("Gamma").unwrap(), RadiationType::Gamma);
        assert_eq!(RadiationType::from_str_flexible(" beta ").unwrap(), RadiationType::Beta);
        assert_eq!(RadiationType::from_str_flexible("NEUTRONS").unwrap(), RadiationType::Neutron);
    }

    #[test]
    fn test_parse_symbols_and_legacy_labels() {
        assert_eq!(RadiationType::from_str_flexible("α").unwrap(), RadiationType::Alpha);
        assert_eq!(RadiationType::from_str_flexible("Гамма").unwrap(), RadiationType::Gamma);
        assert_eq!(
            RadiationType::from_str_flexible("Нейтроны").unwrap(),
            RadiationType::Neutron
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = RadiationType::from_str_flexible("x-ray").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_RADIATION_TYPE");
    }

    #[test]
    fn test_codes_parse_back() {
        for rt in RadiationType::ALL {
            assert_eq!(rt.code().parse::<RadiationType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&RadiationType::Neutron).unwrap();
        assert_eq!(json, "\"neutron\"");
        let parsed: RadiationType = serde_json::from_str("\"alpha\"").unwrap();
        assert_eq!(parsed, RadiationType::Alpha);
    }
}
