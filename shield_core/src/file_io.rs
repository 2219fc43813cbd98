//! # File I/O Module
//!
//! Reads and writes the simulator's data files:
//!
//! - **Settings** (`settings.json`): [`SimulatorSettings`], missing file means defaults
//! - **Coefficient override** (`data/mu_override.json`): partial μ table
//! - **Q&A corpus** (`data/qa.json`): `[{ "question": ..., "answer": ... }]`
//!
//! Writes are atomic (temp file, fsync, rename) and last-write-wins. There
//! is no locking.
//!
//! Reading the override or the corpus never fails: a missing file is an
//! empty override / empty corpus, and an unreadable one is logged and
//! treated the same way.
//!
//! ## Example
//!
//! ```rust,no_run
//! use shield_core::file_io::{load_coefficient_table, load_index};
//! use std::path::Path;
//!
//! let table = load_coefficient_table(Path::new("data/mu_override.json"));
//! let index = load_index(Path::new("data/qa.json"));
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SimulatorSettings;
use crate::errors::{SimError, SimResult};
use crate::materials::{
    parse_override_document, to_override_document, CoefficientMap, CoefficientTable,
};
use crate::retrieval::{QaIndex, QaPair};

/// Read a file to a string, mapping "not found" to `Ok(None)`
fn read_optional(path: &Path) -> SimResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SimError::file_error(
            "read",
            path.display().to_string(),
            e.to_string(),
        )),
    }
}

/// Temp file path used while saving `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp.set_extension(extension);
    tmp
}

/// Write `contents` to `path` atomically.
///
/// 1. Write to a temporary file next to the target
/// 2. Sync to disk (fsync)
/// 3. Rename over the target
fn write_atomic(path: &Path, contents: &str) -> SimResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SimError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        SimError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        SimError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        SimError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SimError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load settings from a JSON file.
///
/// # Returns
///
/// * `Ok(SimulatorSettings::default())` - File does not exist
/// * `Ok(settings)` - Parsed and validated settings
/// * `Err(SimError::SerializationError)` - Invalid JSON
/// * `Err(SimError::InvalidInput)` - Values out of range
pub fn load_settings(path: &Path) -> SimResult<SimulatorSettings> {
    let Some(contents) = read_optional(path)? else {
        debug!(path = %path.display(), "no settings file; using defaults");
        return Ok(SimulatorSettings::default());
    };

    let settings: SimulatorSettings =
        serde_json::from_str(&contents).map_err(|e| SimError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings as pretty JSON.
pub fn save_settings(settings: &SimulatorSettings, path: &Path) -> SimResult<()> {
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| SimError::serialization(e.to_string()))?;
    write_atomic(path, &json)
}

/// Load a coefficient override document.
///
/// Never fails. Missing file, unreadable file and invalid JSON all give an
/// empty override; malformed leaves are dropped individually.
pub fn load_override(path: &Path) -> CoefficientMap {
    let contents = match read_optional(path) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            debug!(path = %path.display(), "no coefficient override");
            return CoefficientMap::new();
        }
        Err(e) => {
            warn!(error = %e, "coefficient override unreadable; ignoring");
            return CoefficientMap::new();
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&contents) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "coefficient override is not valid JSON; ignoring"
            );
            return CoefficientMap::new();
        }
    };

    let overrides = parse_override_document(&doc);
    info!(
        path = %path.display(),
        entries = overrides.values().map(|c| c.len()).sum::<usize>(),
        "coefficient override loaded"
    );
    overrides
}

/// Built-in coefficients merged with the override at `path`
pub fn load_coefficient_table(path: &Path) -> CoefficientTable {
    CoefficientTable::with_overrides(&load_override(path))
}

/// Save a coefficient override. Negative values are written as 0.
pub fn save_override(overrides: &CoefficientMap, path: &Path) -> SimResult<()> {
    let doc = to_override_document(overrides);
    let json =
        serde_json::to_string_pretty(&doc).map_err(|e| SimError::serialization(e.to_string()))?;
    write_atomic(path, &json)?;
    info!(path = %path.display(), "coefficient override saved");
    Ok(())
}

/// Delete the override file. A missing file is not an error.
pub fn reset_override(path: &Path) -> SimResult<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "coefficient override removed");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SimError::file_error(
            "remove",
            path.display().to_string(),
            e.to_string(),
        )),
    }
}

/// Load the Q&A corpus.
///
/// Never fails: a missing or unreadable corpus is logged and returned as
/// empty, which leaves the assistant with nothing to answer.
pub fn load_corpus(path: &Path) -> Vec<QaPair> {
    let contents = match read_optional(path) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            warn!(path = %path.display(), "Q&A corpus not found; assistant disabled");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Q&A corpus unreadable; assistant disabled");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<QaPair>>(&contents) {
        Ok(pairs) => {
            info!(path = %path.display(), pairs = pairs.len(), "Q&A corpus loaded");
            pairs
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Q&A corpus is not valid JSON; assistant disabled"
            );
            Vec::new()
        }
    }
}

/// Build the assistant index from the corpus at `path`
pub fn load_index(path: &Path) -> QaIndex {
    QaIndex::build(load_corpus(path))
}

/// Save a Q&A corpus as pretty JSON.
pub fn save_corpus(pairs: &[QaPair], path: &Path) -> SimResult<()> {
    let json =
        serde_json::to_string_pretty(pairs).map_err(|e| SimError::serialization(e.to_string()))?;
    write_atomic(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{CoefficientPreset, RadiationType, BASE_COEFFICIENTS, LEAD, WATER};
    use tempfile::tempdir;

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/data/mu_override.json"));
        assert_eq!(tmp, Path::new("/data/mu_override.json.tmp"));
    }

    #[test]
    fn test_missing_override_is_empty() {
        let dir = tempdir().unwrap();
        let overrides = load_override(&dir.path().join("nope.json"));
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_invalid_override_json_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mu_override.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_override(&path).is_empty());
    }

    #[test]
    fn test_override_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("mu_override.json");

        let preset = CoefficientPreset::Gamma.apply(&BASE_COEFFICIENTS);
        save_override(&preset, &path).unwrap();
        assert!(!tmp_path_for(&path).exists());

        let table = load_coefficient_table(&path);
        assert_eq!(table.resolve(LEAD, RadiationType::Gamma), 1.5);
        assert_eq!(table.resolve(WATER, RadiationType::Gamma), 0.27);
    }

    #[test]
    fn test_override_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mu_override.json");
        fs::write(&path, r#"{ "gamma": { "Lead": 2.0, "Water": "oops" } }"#).unwrap();

        let table = load_coefficient_table(&path);
        assert_eq!(table.resolve(LEAD, RadiationType::Gamma), 2.0);
        assert_eq!(table.resolve(WATER, RadiationType::Gamma), 0.30);
    }

    #[test]
    fn test_reset_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mu_override.json");
        fs::write(&path, "{}").unwrap();

        reset_override(&path).unwrap();
        assert!(!path.exists());
        // Second reset is a no-op
        reset_override(&path).unwrap();
    }

    #[test]
    fn test_corpus_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("qa.json");
        let pairs = vec![
            QaPair::new("What is ALARA?", "As low as reasonably achievable."),
            QaPair::new("What is half-life?", "Time for half a sample to decay."),
        ];
        save_corpus(&pairs, &path).unwrap();

        assert_eq!(load_corpus(&path), pairs);
        let index = load_index(&path);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_missing_corpus_gives_empty_index() {
        let dir = tempdir().unwrap();
        let index = load_index(&dir.path().join("qa.json"));
        assert!(index.is_empty());
        assert!(index.query("ALARA", 1).is_empty());
    }

    #[test]
    fn test_settings_missing_and_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(load_settings(&path).unwrap(), SimulatorSettings::default());

        let mut settings = SimulatorSettings::default();
        settings.k = 4.0;
        settings.radiation_type = RadiationType::Beta;
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_settings_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        fs::write(&path, r#"{ "d_safe": 0.0 }"#).unwrap();
        assert_eq!(load_settings(&path).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
