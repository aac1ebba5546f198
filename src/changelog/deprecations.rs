//! Deprecation report input
//!
//! The deprecation scanner runs as a separate tool and emits a JSON
//! report; we only read it to enrich the generation prompt.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::{ChangelogError, Result};
use super::types::Deprecation;
use crate::log_debug;

/// Top-level shape of the scanner's JSON report.
#[derive(Deserialize, Debug)]
struct DeprecationReport {
    #[serde(default)]
    deprecations: Vec<Deprecation>,
}

/// Loads deprecations from a scanner report at `path`.
pub fn load_deprecations(path: &Path) -> Result<Vec<Deprecation>> {
    let raw = fs::read_to_string(path).map_err(|source| ChangelogError::DocumentIo {
        path: path.to_path_buf(),
        source,
    })?;

    let report: DeprecationReport = serde_json::from_str(&raw).map_err(|e| {
        ChangelogError::Parse(format!("deprecations report '{}': {e}", path.display()))
    })?;

    log_debug!(
        "Loaded {} deprecation(s) from {}",
        report.deprecations.len(),
        path.display()
    );
    Ok(report.deprecations)
}
