//! The closed set of report views and the selection state passed to the
//! renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Overview,
    Dataset,
    #[serde(rename = "trends")]
    TemperatureTrends,
    #[serde(rename = "geography")]
    GeographicPatterns,
    #[serde(rename = "projections")]
    FutureProjections,
    #[serde(rename = "risk")]
    RiskClassification,
    #[serde(rename = "clustering")]
    CountryClustering,
}

impl View {
    /// Navigation order.
    pub const ALL: [View; 7] = [
        View::Overview,
        View::Dataset,
        View::TemperatureTrends,
        View::GeographicPatterns,
        View::FutureProjections,
        View::RiskClassification,
        View::CountryClustering,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Dataset => "dataset",
            View::TemperatureTrends => "trends",
            View::GeographicPatterns => "geography",
            View::FutureProjections => "projections",
            View::RiskClassification => "risk",
            View::CountryClustering => "clustering",
        }
    }

    /// Comma-separated slugs in navigation order.
    pub fn slug_list() -> String {
        View::ALL.iter().map(|v| v.slug()).collect::<Vec<_>>().join(", ")
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Dataset => "About the Dataset",
            View::TemperatureTrends => "Temperature Trends",
            View::GeographicPatterns => "Geographic Patterns",
            View::FutureProjections => "Future Projections",
            View::RiskClassification => "Logistic Regression: Climate Risk Classification",
            View::CountryClustering => "Country Clustering",
        }
    }

    /// Figure file names shown by this view, relative to the figures
    /// directory, in display order.
    pub fn figures(self) -> &'static [&'static str] {
        match self {
            View::Overview | View::Dataset => &[],
            View::TemperatureTrends => &[
                "eda_univariate_temperature.png",
                "eda_temporal_trends.png",
                "regression_bivariate_analysis.png",
                "eda_decade_analysis.png",
            ],
            View::GeographicPatterns => &[
                "eda_top_countries.png",
                "eda_geographic_heterogeneity.png",
                "eda_case_studies.png",
            ],
            View::FutureProjections => &[
                "regression_model1_simple.png",
                "regression_model2_polynomial.png",
                "regression_future_projections.png",
            ],
            View::RiskClassification => &[CONFUSION_MATRIX_FIGURE, ROC_CURVE_FIGURE],
            View::CountryClustering => &[
                "clustering_optimal_k.png",
                "clustering_pca_visualization.png",
                "clustering_feature_distributions.png",
            ],
        }
    }

    /// Views whose figures are only listed once their data artifact exists.
    pub fn figures_follow_data(self) -> bool {
        matches!(self, View::RiskClassification)
    }

    /// A figure that is only shown alongside another one, as
    /// `(dependent, prerequisite)`.
    pub fn gated_figure(self) -> Option<(&'static str, &'static str)> {
        match self {
            View::RiskClassification => Some((ROC_CURVE_FIGURE, CONFUSION_MATRIX_FIGURE)),
            _ => None,
        }
    }
}

pub const CONFUSION_MATRIX_FIGURE: &str = "logistic_confusion_matrix.png";
pub const ROC_CURVE_FIGURE: &str = "logistic_roc_curve.png";

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for View {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.slug() == wanted)
            .ok_or_else(|| ViewError::Unknown(s.to_string()))
    }
}

/// Navigation state for one render: the selected view plus the country
/// picked in the clustering lookup, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected: View,
    pub country: Option<String>,
}

impl ViewState {
    pub fn new(selected: View) -> Self {
        Self { selected, country: None }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(View::Overview)
    }
}
