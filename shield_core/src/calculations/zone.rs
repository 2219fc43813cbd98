//! Safety zone classification.
//!
//! ```text
//! green   D ≤ D_safe
//! yellow  D_safe < D ≤ 3·D_safe
//! red     D > 3·D_safe
//! ```
//!
//! Boundary values belong to the safer zone.

use serde::{Deserialize, Serialize};

/// Multiple of `D_safe` that bounds the yellow zone
pub const YELLOW_ZONE_FACTOR: f64 = 3.0;

/// Hazard zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// At or below the safety threshold
    Green,
    /// Above the threshold, at most three times it
    Yellow,
    /// More than three times the threshold
    Red,
}

impl Zone {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Green => "Green zone (≤ D_safe)",
            Zone::Yellow => "Yellow zone (D_safe … 3·D_safe)",
            Zone::Red => "Red zone (> 3·D_safe)",
        }
    }

    /// Whether the zone is considered safe
    pub fn is_safe(&self) -> bool {
        matches!(self, Zone::Green)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Classify a dose against the safety threshold
pub fn classify_zone(dose: f64, d_safe: f64) -> Zone {
    if dose <= d_safe {
        Zone::Green
    } else if dose <= YELLOW_ZONE_FACTOR * d_safe {
        Zone::Yellow
    } else {
        Zone::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_safer_zone() {
        let d_safe = 0.2;
        assert_eq!(classify_zone(d_safe, d_safe), Zone::Green);
        assert_eq!(classify_zone(3.0 * d_safe, d_safe), Zone::Yellow);
        assert_eq!(classify_zone(3.0 * d_safe + 1e-9, d_safe), Zone::Red);
    }

    #[test]
    fn test_interior_points() {
        assert_eq!(classify_zone(0.0, 1.0), Zone::Green);
        assert_eq!(classify_zone(2.0, 1.0), Zone::Yellow);
        assert_eq!(classify_zone(100.0, 1.0), Zone::Red);
    }

    #[test]
    fn test_negative_dose_is_green() {
        assert_eq!(classify_zone(-1.0, 0.2), Zone::Green);
    }

    #[test]
    fn test_zone_serialization() {
        assert_eq!(serde_json::to_string(&Zone::Yellow).unwrap(), "\"yellow\"");
        assert!(Zone::Green.is_safe());
        assert!(!Zone::Red.is_safe());
    }
}
