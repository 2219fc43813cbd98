//! # shield_core - Radiation Shielding Calculation Engine
//!
//! `shield_core` is the computational heart of Shieldsim, an educational
//! dose simulator. Given a source strength, a distance, a stack of shield
//! layers and a radiation type it computes the attenuated dose, classifies
//! it into a safety zone, recommends single-material shield thicknesses and
//! flags dangerous material combinations. A small TF-IDF index backs the
//! offline question/answer assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over immutable, build-once tables
//! - **Never fails on physics**: degenerate inputs clamp or map to sentinels
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types for the file and parsing layer
//!
//! ## Quick Start
//!
//! ```rust
//! use shield_core::calculations::{calculate, HazardDetector, ShieldLayer, SimulationInput};
//! use shield_core::materials::{CoefficientTable, RadiationType, CONCRETE, LEAD};
//!
//! let table = CoefficientTable::builtin();
//! let input = SimulationInput {
//!     label: "Bench".to_string(),
//!     k: 1.0,
//!     r_m: 2.0,
//!     d_safe: 0.2,
//!     radiation_type: RadiationType::Gamma,
//!     layers: vec![ShieldLayer::new(LEAD, 1.0), ShieldLayer::new(CONCRETE, 5.0)],
//!     language: "EN".to_string(),
//! };
//!
//! let result = calculate(&input, &table, &HazardDetector::default()).unwrap();
//! assert!(result.passes());
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material catalog, radiation types, coefficient tables and presets
//! - [`calculations`] - Dose, zones, thickness recommendations, hazards, cost
//! - [`retrieval`] - TF-IDF question index for the assistant
//! - [`config`] - Simulator settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Override, corpus and settings files with atomic saves

pub mod calculations;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod retrieval;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, SimulationInput, SimulationResult};
pub use config::SimulatorSettings;
pub use errors::{SimError, SimResult};
pub use materials::{CoefficientTable, RadiationType};
pub use retrieval::{QaIndex, QaPair, QueryMatch};
