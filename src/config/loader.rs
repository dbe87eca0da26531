// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawScenarioFile, ScenarioFile};
use crate::errors::Result;

/// Load a scenario file from a given path and return the raw `RawScenarioFile`.
///
/// This only performs TOML deserialization; it does **not** validate worker
/// behaviours or the union name. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScenarioFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

/// Parse scenario TOML that is already in memory.
pub fn parse_str(contents: &str) -> Result<RawScenarioFile> {
    let scenario: RawScenarioFile = toml::from_str(contents)?;
    Ok(scenario)
}

/// Load a scenario file from path and validate it.
///
/// This is the entry point the CLI uses:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde`).
/// - Checks the union name, every worker's behaviour and its parameters, and
///   label uniqueness.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScenarioFile> {
    let raw = load_from_path(path)?;
    ScenarioFile::try_from(raw)
}
