//! Locations of the report artifacts.
//!
//! Defaults match the layout the modelling notebooks write into. Relative
//! entries resolve against `root`; absolute entries are used as-is.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const PROJECTIONS_CSV: &str = "reports/temperature_projections_2030.csv";
pub const CLUSTERING_CSV: &str = "reports/clustering_results_named.csv";
pub const FIGURES_DIR: &str = "reports/figures";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPaths {
    pub root: PathBuf,
    pub projections: PathBuf,
    pub clustering: PathBuf,
    pub figures_dir: PathBuf,
}

impl Default for ReportPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            projections: PathBuf::from(PROJECTIONS_CSV),
            clustering: PathBuf::from(CLUSTERING_CSV),
            figures_dir: PathBuf::from(FIGURES_DIR),
        }
    }
}

impl ReportPaths {
    /// Default layout under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn projections_path(&self) -> PathBuf {
        self.root.join(&self.projections)
    }

    pub fn clustering_path(&self) -> PathBuf {
        self.root.join(&self.clustering)
    }

    pub fn figure_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.figures_dir).join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default artifact locations live under reports/.
    #[test]
    fn defaults_resolve_under_root() {
        let paths = ReportPaths::with_root("/data/atlas");
        assert_eq!(
            paths.projections_path(),
            PathBuf::from("/data/atlas/reports/temperature_projections_2030.csv")
        );
        assert_eq!(
            paths.clustering_path(),
            PathBuf::from("/data/atlas/reports/clustering_results_named.csv")
        );
        assert_eq!(
            paths.figure_path("clustering_optimal_k.png"),
            PathBuf::from("/data/atlas/reports/figures/clustering_optimal_k.png")
        );
    }

    #[test]
    fn absolute_entries_ignore_root() {
        let paths = ReportPaths {
            projections: PathBuf::from("/elsewhere/p.csv"),
            ..ReportPaths::with_root("/data/atlas")
        };
        assert_eq!(paths.projections_path(), PathBuf::from("/elsewhere/p.csv"));
    }
}
