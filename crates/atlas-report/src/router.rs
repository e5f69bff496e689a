//! Builds the typed content of one view from the artifacts on disk.
//!
//! Every call reloads what the view needs. An absent artifact becomes a
//! placeholder section; a malformed one fails this view only.

use std::path::PathBuf;

use atlas_core::clusters::{
    aggregate_by_cluster, cluster_assignments, cluster_members, country_names, find_country, peer_count,
    similar_countries, top_by_mean_temp, ClusterAssignment, DEFAULT_SIMILAR_K, DEFAULT_TOP_K,
};
use atlas_core::{
    assess_projections, load_cluster_profiles, load_projections, locate_figure, Artifact, ArtifactError,
    ClusterError, ClusterSummary, CountryClusterProfile, ReportPaths, RiskAssessment, RiskCurve,
    TemperatureProjectionRecord, View, ViewState,
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureState {
    Available,
    Missing,
    /// Present on disk but not shown because the figure it accompanies is missing.
    Withheld,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureStatus {
    pub name: &'static str,
    pub path: PathBuf,
    pub state: FigureState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterShare {
    pub name: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfile {
    pub summary: ClusterSummary,
    pub top_countries: Vec<CountryClusterProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Stands in for data whose artifact has not been generated yet.
    Placeholder { artifact: PathBuf, message: String },
    Projections { rows: Vec<TemperatureProjectionRecord> },
    RiskTable { curve: RiskCurve, rows: Vec<RiskAssessment> },
    ClusterOverview {
        total_countries: usize,
        distribution: Vec<ClusterShare>,
        profiles: Vec<ClusterProfile>,
    },
    /// Every country's cluster, for the map, plus the sorted lookup list.
    ClusterAssignments {
        countries: Vec<String>,
        rows: Vec<ClusterAssignment>,
    },
    CountryLookup {
        profile: CountryClusterProfile,
        /// Other members of the same cluster.
        peers_in_cluster: usize,
        similar: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub view: View,
    pub title: &'static str,
    pub figures: Vec<FigureStatus>,
    pub sections: Vec<Section>,
}

pub fn build_report(state: &ViewState, paths: &ReportPaths) -> Result<ViewReport, RouterError> {
    let view = state.selected;
    debug!(view = %view, "building view");

    let sections = match view {
        View::FutureProjections => projection_sections(paths)?,
        View::RiskClassification => risk_sections(paths)?,
        View::CountryClustering => clustering_sections(paths, state.country.as_deref())?,
        View::Overview | View::Dataset | View::TemperatureTrends | View::GeographicPatterns => Vec::new(),
    };

    let data_absent = sections.iter().any(|s| matches!(s, Section::Placeholder { .. }));
    let figures = if view.figures_follow_data() && data_absent {
        Vec::new()
    } else {
        figure_statuses(view, paths)
    };

    Ok(ViewReport {
        view,
        title: view.title(),
        figures,
        sections,
    })
}

pub fn figure_statuses(view: View, paths: &ReportPaths) -> Vec<FigureStatus> {
    let mut out: Vec<FigureStatus> = view
        .figures()
        .iter()
        .map(|&name| {
            let path = paths.figure_path(name);
            let state = match locate_figure(&path) {
                Artifact::Present(_) => FigureState::Available,
                Artifact::Absent => FigureState::Missing,
            };
            FigureStatus { name, path, state }
        })
        .collect();

    if let Some((dependent, prerequisite)) = view.gated_figure() {
        let prerequisite_shown = out
            .iter()
            .any(|f| f.name == prerequisite && f.state == FigureState::Available);
        if !prerequisite_shown {
            for f in out.iter_mut().filter(|f| f.name == dependent && f.state == FigureState::Available) {
                f.state = FigureState::Withheld;
            }
        }
    }
    out
}

fn placeholder(artifact: PathBuf, what: &str) -> Section {
    Section::Placeholder {
        message: format!("{what} not yet generated. Run the modelling notebooks to produce {}.", artifact.display()),
        artifact,
    }
}

fn projection_sections(paths: &ReportPaths) -> Result<Vec<Section>, RouterError> {
    let path = paths.projections_path();
    Ok(match load_projections(&path)? {
        Artifact::Present(rows) => vec![Section::Projections { rows }],
        Artifact::Absent => vec![placeholder(path, "Temperature projections")],
    })
}

fn risk_sections(paths: &ReportPaths) -> Result<Vec<Section>, RouterError> {
    let path = paths.projections_path();
    let curve = RiskCurve::default();
    Ok(match load_projections(&path)? {
        Artifact::Present(rows) => vec![Section::RiskTable {
            curve,
            rows: assess_projections(&rows, &curve),
        }],
        Artifact::Absent => vec![placeholder(path, "Risk projections")],
    })
}

fn clustering_sections(paths: &ReportPaths, country: Option<&str>) -> Result<Vec<Section>, RouterError> {
    let path = paths.clustering_path();
    let rows = match load_cluster_profiles(&path)? {
        Artifact::Present(rows) => rows,
        Artifact::Absent => return Ok(vec![placeholder(path, "Clustering results")]),
    };

    let report = aggregate_by_cluster(&rows)?;
    let distribution = report
        .distribution()
        .into_iter()
        .map(|s| ClusterShare {
            name: s.name.clone(),
            count: s.count,
            percentage: s.percentage,
        })
        .collect();
    let profiles = report
        .iter()
        .map(|summary| ClusterProfile {
            summary: summary.clone(),
            top_countries: top_by_mean_temp(cluster_members(&rows, &summary.name), DEFAULT_TOP_K)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    let mut sections = vec![
        Section::ClusterOverview {
            total_countries: report.total_countries(),
            distribution,
            profiles,
        },
        Section::ClusterAssignments {
            countries: country_names(&rows).into_iter().map(str::to_string).collect(),
            rows: cluster_assignments(&rows),
        },
    ];

    if let Some(name) = country {
        let profile = find_country(&rows, name)
            .ok_or_else(|| ClusterError::UnknownCountry { name: name.to_string() })?
            .clone();
        let peers_in_cluster = peer_count(&rows, name)?;
        let similar = similar_countries(&rows, name, DEFAULT_SIMILAR_K)?
            .into_iter()
            .map(|p| p.country.clone())
            .collect();
        sections.push(Section::CountryLookup {
            profile,
            peers_in_cluster,
            similar,
        });
    }

    Ok(sections)
}
