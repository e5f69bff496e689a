//! Per-cluster statistics and rankings over country cluster profiles.
//!
//! Cluster membership is assigned upstream and is exclusive: every country
//! row carries exactly one `cluster_name`. Everything here is a pure
//! function of the loaded rows.

pub mod ranking;
pub mod summary;

pub use ranking::{
    cluster_assignments, cluster_members, country_names, find_country, peer_count, similar_countries,
    top_by_mean_temp, ClusterAssignment, DEFAULT_SIMILAR_K, DEFAULT_TOP_K,
};
pub use summary::{aggregate_by_cluster, ClusterReport, ClusterSummary};
