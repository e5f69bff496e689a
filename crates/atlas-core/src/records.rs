//! Typed rows of the two CSV artifacts.
//!
//! Field names follow the column headers written by the modelling
//! notebooks, so rows deserialize straight out of a [`crate::Table`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::artifact::Table;
use crate::error::ArtifactError;

/// One projected year from the quadratic (and optionally linear) trend fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureProjectionRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    /// Projected anomaly in °C relative to the 1951–1980 baseline.
    #[serde(rename = "Quadratic_Projection")]
    pub quadratic_projection: f64,
    #[serde(rename = "Quadratic_CI_Lower")]
    pub quadratic_ci_lower: f64,
    #[serde(rename = "Quadratic_CI_Upper")]
    pub quadratic_ci_upper: f64,
    #[serde(rename = "Linear_Projection", default, skip_serializing_if = "Option::is_none")]
    pub linear_projection: Option<f64>,
    #[serde(rename = "Linear_CI_Lower", default, skip_serializing_if = "Option::is_none")]
    pub linear_ci_lower: Option<f64>,
    #[serde(rename = "Linear_CI_Upper", default, skip_serializing_if = "Option::is_none")]
    pub linear_ci_upper: Option<f64>,
}

/// A country's warming statistics plus its assigned cluster label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryClusterProfile {
    pub country: String,
    pub iso3: String,
    pub cluster_name: String,
    pub cluster_description: String,
    /// Historical average anomaly (°C).
    #[serde(deserialize_with = "empty_as_nan")]
    pub mean_temp: f64,
    /// Volatility of the yearly anomaly (°C).
    #[serde(deserialize_with = "empty_as_nan")]
    pub std_temp: f64,
    /// Linear trend slope (°C/year).
    #[serde(deserialize_with = "empty_as_nan")]
    pub warming_rate: f64,
    /// Mean anomaly over the recent period (2010–2022).
    #[serde(deserialize_with = "empty_as_nan")]
    pub recent_mean: f64,
    /// Mean anomaly over the early period (1961–1980).
    #[serde(deserialize_with = "empty_as_nan")]
    pub early_mean: f64,
    #[serde(deserialize_with = "empty_as_nan")]
    pub period_change: f64,
    /// Second-derivative trend (°C/year²).
    #[serde(deserialize_with = "empty_as_nan")]
    pub acceleration: f64,
}

/// An empty cell is how the clustering pipeline writes a missing value;
/// read it as NaN. Non-numeric text is still an error.
fn empty_as_nan<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Option::<f64>::deserialize(de).map(|v| v.unwrap_or(f64::NAN))
}

impl CountryClusterProfile {
    pub fn warming_rate_per_decade(&self) -> f64 {
        self.warming_rate * 10.0
    }
}

/// Typed projection rows, checked for increasing years and ordered
/// confidence bounds.
pub fn projection_rows(table: &Table) -> Result<Vec<TemperatureProjectionRecord>, ArtifactError> {
    let rows: Vec<TemperatureProjectionRecord> = table.rows()?;

    for (i, pair) in rows.windows(2).enumerate() {
        if pair[1].year <= pair[0].year {
            return Err(table.malformed(
                i + 2,
                format!("year {} does not follow {}", pair[1].year, pair[0].year),
            ));
        }
    }

    for (i, r) in rows.iter().enumerate() {
        // NaN bounds compare false on both sides and pass through.
        if r.quadratic_ci_lower > r.quadratic_projection || r.quadratic_projection > r.quadratic_ci_upper {
            return Err(table.malformed(
                i + 1,
                format!(
                    "projection {} outside confidence interval [{}, {}]",
                    r.quadratic_projection, r.quadratic_ci_lower, r.quadratic_ci_upper
                ),
            ));
        }
    }

    Ok(rows)
}

pub fn cluster_rows(table: &Table) -> Result<Vec<CountryClusterProfile>, ArtifactError> {
    table.rows()
}
