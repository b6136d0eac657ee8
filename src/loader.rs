//! Contract loading
//!
//! Reads an API contract from a YAML or JSON file. Files ending in `.json`
//! are parsed as JSON; everything else (`.yaml`, `.yml`, `.apk-conf`) as YAML,
//! which also accepts JSON documents.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::ApiContract;
use crate::errors::{Error, Result};

/// Load and parse a contract file
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_contract<P: AsRef<Path>>(path: P) -> Result<ApiContract> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::from(e).with_context(format!("Failed to read {}", path.display())))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json { parse_json(&contents) } else { parse_yaml(&contents) };
    let contract = parsed
        .map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))?;

    debug!(
        contract = %contract.name,
        operations = contract.operations.len(),
        "Loaded API contract"
    );
    Ok(contract)
}

pub fn parse_yaml(contents: &str) -> Result<ApiContract> {
    Ok(serde_yaml::from_str(contents)?)
}

pub fn parse_json(contents: &str) -> Result<ApiContract> {
    Ok(serde_json::from_str(contents)?)
}
