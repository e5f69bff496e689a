//! Data access for the pre-generated report artifacts.
//!
//! Artifacts are produced offline and may not exist yet. A missing file is
//! an expected state and comes back as [`Artifact::Absent`]; only files that
//! exist but cannot be read surface as errors. Nothing is cached: every call
//! goes back to disk.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ArtifactError;
use crate::records::{cluster_rows, projection_rows, CountryClusterProfile, TemperatureProjectionRecord};

/// Result of looking up an optional artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact<T> {
    Present(T),
    Absent,
}

impl<T> Artifact<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Artifact::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Artifact::Absent)
    }

    pub fn as_ref(&self) -> Artifact<&T> {
        match self {
            Artifact::Present(v) => Artifact::Present(v),
            Artifact::Absent => Artifact::Absent,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Artifact<U> {
        match self {
            Artifact::Present(v) => Artifact::Present(f(v)),
            Artifact::Absent => Artifact::Absent,
        }
    }

    /// Apply a fallible conversion to a present value; absence passes through.
    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<Artifact<U>, E> {
        match self {
            Artifact::Present(v) => f(v).map(Artifact::Present),
            Artifact::Absent => Ok(Artifact::Absent),
        }
    }

    pub fn present(self) -> Option<T> {
        match self {
            Artifact::Present(v) => Some(v),
            Artifact::Absent => None,
        }
    }
}

/// Raw contents of a CSV artifact: headers plus untyped records.
///
/// No schema is enforced here. Typed access through [`Table::rows`] is where
/// a wrong column set or a non-numeric cell is reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: StringRecord,
    records: Vec<StringRecord>,
    source: PathBuf,
}

impl Table {
    /// Read a whole CSV document. Ragged rows are kept as-is and cells are
    /// whitespace-trimmed.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let source = source.into();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let csv_err = |e: csv::Error| ArtifactError::Csv { path: source.clone(), source: e };

        let headers = rdr.headers().map_err(csv_err)?.clone();
        let records = rdr
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        Ok(Self { headers, records, source })
    }

    pub fn from_csv_str(text: &str, source: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        Self::from_reader(text.as_bytes(), source)
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Deserialize every record into `T`, keyed by header name.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, ArtifactError> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                rec.deserialize::<T>(Some(&self.headers))
                    .map_err(|e| self.malformed(i + 1, deserialize_reason(&e)))
            })
            .collect()
    }

    pub(crate) fn malformed(&self, row: usize, reason: impl Into<String>) -> ArtifactError {
        ArtifactError::Malformed {
            path: self.source.clone(),
            row,
            reason: reason.into(),
        }
    }
}

fn deserialize_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}

/// Load a CSV artifact from `path`.
///
/// Returns `Ok(Artifact::Absent)` when the file does not exist. Any other
/// open or read failure is an error.
pub fn load_table(path: &Path) -> Result<Artifact<Table>, ArtifactError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "artifact absent");
            return Ok(Artifact::Absent);
        }
        Err(e) => {
            return Err(ArtifactError::Io { path: path.to_path_buf(), source: e });
        }
    };

    let table = Table::from_reader(file, path)?;
    debug!(path = %path.display(), rows = table.len(), "artifact loaded");
    Ok(Artifact::Present(table))
}

/// Existence check for an opaque figure. The file contents are never read.
pub fn locate_figure(path: &Path) -> Artifact<PathBuf> {
    if path.is_file() {
        Artifact::Present(path.to_path_buf())
    } else {
        Artifact::Absent
    }
}

pub fn load_projections(path: &Path) -> Result<Artifact<Vec<TemperatureProjectionRecord>>, ArtifactError> {
    load_table(path)?.try_map(|t| projection_rows(&t))
}

pub fn load_cluster_profiles(path: &Path) -> Result<Artifact<Vec<CountryClusterProfile>>, ArtifactError> {
    load_table(path)?.try_map(|t| cluster_rows(&t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    /// A missing file is an expected state, not an error.
    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_table(&dir.path().join("nope.csv"));
        assert!(matches!(result, Ok(Artifact::Absent)));
    }

    #[test]
    fn missing_directory_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("deeper").join("nope.csv");
        assert!(load_table(&path).unwrap().is_absent());
    }

    #[test]
    fn present_file_is_loaded_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a,b\n1,2\n3,4\n");
        let table = load_table(&path).unwrap().present().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(table.has_column("b"));
        assert!(!table.has_column("c"));
        assert_eq!(table.source(), path.as_path());
    }

    /// Loading never looks at cell contents.
    #[test]
    fn load_does_not_validate_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "Year,Quadratic_Projection\nsoon,hot\n2024\n");
        let table = load_table(&path).unwrap().present().unwrap();
        assert_eq!(table.len(), 2);
    }

    /// Nothing is cached between loads.
    #[test]
    fn repeated_loads_reread_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "a\n1\n");
        let first = load_table(&path).unwrap().present().unwrap();
        assert_eq!(first, load_table(&path).unwrap().present().unwrap());

        fs::write(&path, "a\n1\n2\n").unwrap();
        assert_eq!(load_table(&path).unwrap().present().unwrap().len(), 2);

        fs::remove_file(&path).unwrap();
        assert!(load_table(&path).unwrap().is_absent());
    }

    #[test]
    fn cells_are_trimmed() {
        let table = Table::from_csv_str("name , value\n alpha , 1.5 \n", "t.csv").unwrap();
        #[derive(serde::Deserialize)]
        struct Row {
            name: String,
            value: f64,
        }
        let rows: Vec<Row> = table.rows().unwrap();
        assert_eq!(rows[0].name, "alpha");
        assert_eq!(rows[0].value, 1.5);
    }

    /// Row numbers count data rows from 1.
    #[test]
    fn typed_rows_report_malformed_row_number() {
        let table = Table::from_csv_str("value\n1.0\nx\n", "t.csv").unwrap();
        #[derive(Debug, serde::Deserialize)]
        struct Row {
            #[allow(dead_code)]
            value: f64,
        }
        match table.rows::<Row>() {
            Err(ArtifactError::Malformed { row, path, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(path, PathBuf::from("t.csv"));
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    /// Figures are checked for existence, never read.
    #[test]
    fn figure_lookup_is_existence_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "fig.png", "not really a png");
        assert_eq!(locate_figure(&path), Artifact::Present(path.clone()));
        assert!(locate_figure(&dir.path().join("other.png")).is_absent());
        assert!(locate_figure(dir.path()).is_absent());
    }

    #[test]
    fn typed_loaders_keep_absence() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_projections(&dir.path().join("p.csv")).unwrap().is_absent());
        assert!(load_cluster_profiles(&dir.path().join("c.csv")).unwrap().is_absent());
    }

    #[test]
    fn typed_loader_surfaces_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "c.csv", "country,mean_temp\nChad,warm\n");
        assert!(matches!(
            load_cluster_profiles(&path),
            Err(ArtifactError::Malformed { .. })
        ));
    }

    #[test]
    fn artifact_helpers() {
        let a: Artifact<i32> = Artifact::Present(2);
        assert_eq!(a.as_ref().map(|v| v * 10), Artifact::Present(20));
        assert_eq!(a.clone().present(), Some(2));
        let b: Artifact<i32> = Artifact::Absent;
        assert_eq!(b.clone().map(|v| v + 1), Artifact::Absent);
        assert_eq!(b.try_map(|v| Ok::<_, ()>(v)), Ok(Artifact::Absent));
        assert_eq!(a.try_map(|_| Err::<i32, _>("boom")), Err("boom"));
    }
}
