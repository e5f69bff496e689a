//! Leaderboards and same-cluster neighbour lookup.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::ClusterError;
use crate::records::CountryClusterProfile;

/// Length of the per-cluster leaderboard.
pub const DEFAULT_TOP_K: usize = 10;
/// Number of neighbours listed for a country lookup.
pub const DEFAULT_SIMILAR_K: usize = 5;

/// Descending by `mean_temp`. Only called on non-NaN values.
fn by_mean_temp_desc(a: &CountryClusterProfile, b: &CountryClusterProfile) -> Ordering {
    b.mean_temp.partial_cmp(&a.mean_temp).unwrap_or(Ordering::Equal)
}

/// The `k` warmest rows by `mean_temp`. Rows without a `mean_temp` are left
/// out. The sort is stable, so ties keep their input order.
pub fn top_by_mean_temp<'a, I>(rows: I, k: usize) -> Vec<&'a CountryClusterProfile>
where
    I: IntoIterator<Item = &'a CountryClusterProfile>,
{
    let mut ranked: Vec<&CountryClusterProfile> = rows.into_iter().filter(|p| !p.mean_temp.is_nan()).collect();
    ranked.sort_by(|a, b| by_mean_temp_desc(a, b));
    ranked.truncate(k);
    ranked
}

pub fn find_country<'a>(rows: &'a [CountryClusterProfile], country: &str) -> Option<&'a CountryClusterProfile> {
    rows.iter().find(|p| p.country == country)
}

pub fn cluster_members<'a>(rows: &'a [CountryClusterProfile], cluster: &str) -> Vec<&'a CountryClusterProfile> {
    rows.iter().filter(|p| p.cluster_name == cluster).collect()
}

/// Number of other countries in `target`'s cluster.
pub fn peer_count(rows: &[CountryClusterProfile], target: &str) -> Result<usize, ClusterError> {
    let anchor = find_country(rows, target).ok_or_else(|| ClusterError::UnknownCountry {
        name: target.to_string(),
    })?;
    Ok(cluster_members(rows, &anchor.cluster_name)
        .into_iter()
        .filter(|p| p.country != target)
        .count())
}

/// Which cluster a country belongs to, keyed by ISO3 code for map joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterAssignment {
    pub country: String,
    pub iso3: String,
    pub cluster_name: String,
}

/// One assignment per row, in input order.
pub fn cluster_assignments(rows: &[CountryClusterProfile]) -> Vec<ClusterAssignment> {
    rows.iter()
        .map(|p| ClusterAssignment {
            country: p.country.clone(),
            iso3: p.iso3.clone(),
            cluster_name: p.cluster_name.clone(),
        })
        .collect()
}

/// Sorted, de-duplicated country names for a selection list.
pub fn country_names(rows: &[CountryClusterProfile]) -> Vec<&str> {
    let mut names: Vec<&str> = rows.iter().map(|p| p.country.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Countries sharing `target`'s cluster, warmest first, never including
/// `target` itself. The cluster is taken from the first row named `target`.
pub fn similar_countries<'a>(
    rows: &'a [CountryClusterProfile],
    target: &str,
    k: usize,
) -> Result<Vec<&'a CountryClusterProfile>, ClusterError> {
    let anchor = find_country(rows, target).ok_or_else(|| ClusterError::UnknownCountry {
        name: target.to_string(),
    })?;

    let peers = rows
        .iter()
        .filter(|p| p.cluster_name == anchor.cluster_name && p.country != target);
    Ok(top_by_mean_temp(peers, k))
}
