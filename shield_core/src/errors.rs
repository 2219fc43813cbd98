//! # Error Types
//!
//! Structured error types for shield_core.
//!
//! The numeric engine never fails: degenerate inputs are clamped or mapped to
//! sentinel results. Errors only come out of identifier parsing, settings
//! validation and the file layer.
//!
//! ## Example
//!
//! ```rust
//! use shield_core::errors::{SimError, SimResult};
//!
//! fn validate_threshold(d_safe: f64) -> SimResult<()> {
//!     if d_safe <= 0.0 {
//!         return Err(SimError::invalid_input(
//!             "d_safe",
//!             d_safe.to_string(),
//!             "Safety threshold must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for shield_core operations
pub type SimResult<T> = Result<T, SimError>;

/// Structured error type for simulator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SimError {
    /// An input value is invalid (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Radiation type name could not be parsed
    #[error("Unknown radiation type: {name}")]
    UnknownRadiationType { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SimError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SimError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownRadiationType error
    pub fn unknown_radiation_type(name: impl Into<String>) -> Self {
        SimError::UnknownRadiationType { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SimError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        SimError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SimError::InvalidInput { .. } => "INVALID_INPUT",
            SimError::UnknownRadiationType { .. } => "UNKNOWN_RADIATION_TYPE",
            SimError::FileError { .. } => "FILE_ERROR",
            SimError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
