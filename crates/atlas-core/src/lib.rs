//! Analytics layer for the warming-atlas reporting surface.
//!
//! Loads the tabular artifacts produced by the offline modelling pipeline,
//! tolerating their absence, and derives the secondary metrics the views
//! display: the logistic risk curve over projected anomalies and the
//! per-cluster summaries and rankings over country profiles.

pub mod artifact;
pub mod clusters;
pub mod error;
pub mod paths;
pub mod records;
pub mod risk;
pub mod views;

pub use artifact::{load_cluster_profiles, load_projections, load_table, locate_figure, Artifact, Table};
pub use clusters::{aggregate_by_cluster, similar_countries, top_by_mean_temp, ClusterReport, ClusterSummary};
pub use error::{ArtifactError, ClusterError, ViewError};
pub use paths::ReportPaths;
pub use records::{CountryClusterProfile, TemperatureProjectionRecord};
pub use risk::{assess_projections, risk_probability, RiskAssessment, RiskCurve, RiskLevel};
pub use views::{View, ViewState};
