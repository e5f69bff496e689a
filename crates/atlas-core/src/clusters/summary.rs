//! Cluster aggregation: counts, shares and feature means per cluster.

use serde::Serialize;
use tracing::warn;

use crate::error::ClusterError;
use crate::records::CountryClusterProfile;

/// Aggregate statistics for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub name: String,
    pub count: usize,
    /// Share of all loaded countries, 0–100.
    pub percentage: f64,
    pub mean_temp: f64,
    /// Mean of `warming_rate × 10` (°C/decade).
    pub mean_warming_rate_per_decade: f64,
    pub mean_recent: f64,
    pub mean_acceleration: f64,
    pub description: String,
}

/// All cluster summaries of one load, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    summaries: Vec<ClusterSummary>,
    total: usize,
}

impl ClusterReport {
    pub fn get(&self, name: &str) -> Option<&ClusterSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClusterSummary> {
        self.summaries.iter()
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn total_countries(&self) -> usize {
        self.total
    }

    /// Clusters ordered by member count, largest first. Equal counts keep
    /// first-appearance order.
    pub fn distribution(&self) -> Vec<&ClusterSummary> {
        let mut out: Vec<&ClusterSummary> = self.summaries.iter().collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }
}

impl<'a> IntoIterator for &'a ClusterReport {
    type Item = &'a ClusterSummary;
    type IntoIter = std::slice::Iter<'a, ClusterSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.summaries.iter()
    }
}

/// Group rows by `cluster_name` and summarise each group.
///
/// Groups appear in the order their first member appears in `rows`.
/// An empty input yields an empty report.
pub fn aggregate_by_cluster(rows: &[CountryClusterProfile]) -> Result<ClusterReport, ClusterError> {
    let mut groups: Vec<(&str, Vec<&CountryClusterProfile>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(name, _)| *name == row.cluster_name) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.cluster_name.as_str(), vec![row])),
        }
    }

    let summaries = groups
        .into_iter()
        .map(|(name, members)| summarize(name, &members, rows.len()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ClusterReport {
        summaries,
        total: rows.len(),
    })
}

fn summarize(name: &str, members: &[&CountryClusterProfile], total: usize) -> Result<ClusterSummary, ClusterError> {
    if members.is_empty() || total == 0 {
        return Err(ClusterError::EmptyCluster { name: name.to_string() });
    }

    let description = members[0].cluster_description.clone();
    if members.iter().any(|p| p.cluster_description != description) {
        warn!(cluster = name, "cluster rows disagree on description; using the first");
    }

    Ok(ClusterSummary {
        name: name.to_string(),
        count: members.len(),
        percentage: members.len() as f64 / total as f64 * 100.0,
        mean_temp: mean_of(members, |p| p.mean_temp),
        mean_warming_rate_per_decade: mean_of(members, |p| p.warming_rate_per_decade()),
        mean_recent: mean_of(members, |p| p.recent_mean),
        mean_acceleration: mean_of(members, |p| p.acceleration),
        description,
    })
}

/// Mean over the members whose value is a number. NaN only when none is.
fn mean_of(members: &[&CountryClusterProfile], feature: impl Fn(&CountryClusterProfile) -> f64) -> f64 {
    let (sum, n) = members
        .iter()
        .map(|&p| feature(p))
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}
