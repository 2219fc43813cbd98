//! Dangerous material combinations.
//!
//! A [`HazardRule`] fires when every one of its materials is present in the
//! stack with a thickness greater than zero. All matching rules fire, in
//! rule order.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::attenuation::ShieldLayer;
use crate::errors::{SimError, SimResult};
use crate::materials::{LEAD, STEEL, WATER};

/// Language used when the requested one has no message
pub const FALLBACK_LANGUAGE: &str = "EN";

/// A set of materials that should not be combined, with a warning text per
/// language code.
///
/// Every rule names at least two distinct materials. Deserialization goes
/// through [`HazardRule::new`], so a stored rule set cannot bypass that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHazardRule")]
pub struct HazardRule {
    materials: BTreeSet<String>,
    messages: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RawHazardRule {
    materials: Vec<String>,
    #[serde(default)]
    messages: BTreeMap<String, String>,
}

impl TryFrom<RawHazardRule> for HazardRule {
    type Error = SimError;

    fn try_from(raw: RawHazardRule) -> SimResult<Self> {
        let mut rule = HazardRule::new(raw.materials)?;
        rule.messages = raw.messages;
        Ok(rule)
    }
}

impl HazardRule {
    /// Create a rule with no messages yet.
    ///
    /// Fails if fewer than two distinct materials are given.
    pub fn new<I, S>(materials: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let materials: BTreeSet<String> = materials.into_iter().map(Into::into).collect();
        if materials.len() < 2 {
            return Err(SimError::invalid_input(
                "materials",
                format!("{:?}", materials),
                "A hazard rule needs at least two distinct materials",
            ));
        }
        Ok(HazardRule {
            materials,
            messages: BTreeMap::new(),
        })
    }

    /// Materials that must all be present for the rule to fire
    pub fn materials(&self) -> &BTreeSet<String> {
        &self.materials
    }

    /// Warning text keyed by language code ("EN", "RU", ...)
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    /// Add a localized message (builder pattern)
    pub fn with_message(mut self, language: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(language.into(), message.into());
        self
    }

    /// Pick the message for `language`: exact match, then English, then the
    /// first message by language code. Empty messages count as missing.
    pub fn message_for(&self, language: &str) -> Option<&str> {
        let non_empty = |m: &&String| !m.is_empty();
        self.messages
            .get(language)
            .filter(non_empty)
            .or_else(|| self.messages.get(FALLBACK_LANGUAGE).filter(non_empty))
            .or_else(|| self.messages.values().next().filter(non_empty))
            .map(String::as_str)
    }

    /// Whether every material of the rule is in `present`
    pub fn matches(&self, present: &BTreeSet<String>) -> bool {
        self.materials.is_subset(present)
    }
}

/// Built-in rules
pub static DEFAULT_HAZARD_RULES: Lazy<Vec<HazardRule>> = Lazy::new(|| {
    [
        (
            LEAD,
            WATER,
            "Lead in contact with water can leach toxic compounds. Seal the lead layer.",
            "Свинец в контакте с водой может выделять токсичные соединения. \
             Герметизируйте свинцовый слой.",
        ),
        (
            STEEL,
            WATER,
            "Steel next to water corrodes over time. Separate or coat the steel layer.",
            "Сталь рядом с водой со временем корродирует. Разделите слои или покройте сталь.",
        ),
    ]
    .into_iter()
    .filter_map(|(a, b, en, ru)| {
        HazardRule::new([a, b])
            .ok()
            .map(|rule| rule.with_message("EN", en).with_message("RU", ru))
    })
    .collect()
});

/// Materials present in the stack (thickness > 0)
pub fn present_materials(layers: &[ShieldLayer]) -> BTreeSet<String> {
    layers
        .iter()
        .filter(|layer| layer.is_present())
        .map(|layer| layer.material.clone())
        .collect()
}

/// Evaluates hazard rules against layer stacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDetector {
    rules: Vec<HazardRule>,
}

impl HazardDetector {
    /// Detector with a custom rule set
    pub fn new(rules: Vec<HazardRule>) -> Self {
        HazardDetector { rules }
    }

    /// Configured rules in evaluation order
    pub fn rules(&self) -> &[HazardRule] {
        &self.rules
    }

    /// All warnings triggered by `layers`, in rule order
    pub fn detect(&self, layers: &[ShieldLayer], language: &str) -> Vec<String> {
        let present = present_materials(layers);
        self.rules
            .iter()
            .filter(|rule| rule.matches(&present))
            .filter_map(|rule| rule.message_for(language))
            .map(str::to_string)
            .collect()
    }
}

impl Default for HazardDetector {
    fn default() -> Self {
        HazardDetector::new(DEFAULT_HAZARD_RULES.clone())
    }
}

/// Detect hazards with the built-in rules
pub fn detect_hazards(layers: &[ShieldLayer], language: &str) -> Vec<String> {
    HazardDetector::default().detect(layers, language)
}
