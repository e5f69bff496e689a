use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or interpreting a tabular artifact.
///
/// A missing file is not an error: it surfaces as [`crate::Artifact::Absent`].
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Present but unusable: wrong columns, non-numeric cells, broken
    /// ordering. `row` counts data rows from 1; 0 means the table as a whole.
    #[error("malformed artifact {} (row {row}): {reason}", path.display())]
    Malformed {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("cluster '{name}' has no members")]
    EmptyCluster { name: String },

    #[error("country '{name}' not found in clustering results")]
    UnknownCountry { name: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown view '{0}' (expected one of: {expected})", expected = crate::views::View::slug_list())]
    Unknown(String),
}
