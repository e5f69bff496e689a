use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atlas_core::ReportPaths;

/// Resolve artifact locations: defaults under `root`, optionally overridden
/// by a JSON file holding any subset of the `ReportPaths` fields.
///
/// A `root` given in the file wins over the command-line one.
pub fn resolve_paths(root: &Path, config: Option<&Path>) -> Result<ReportPaths> {
    let Some(config) = config else {
        return Ok(ReportPaths::with_root(root));
    };

    let text = fs::read_to_string(config).with_context(|| format!("Cannot read config {}", config.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", config.display()))?;
    let has_root = value.get("root").is_some();

    let mut paths: ReportPaths =
        serde_json::from_value(value).with_context(|| format!("Invalid report paths in {}", config.display()))?;
    if !has_root {
        paths.root = PathBuf::from(root);
    }
    Ok(paths)
}
