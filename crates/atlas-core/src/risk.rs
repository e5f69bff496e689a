//! Logistic risk curve over projected temperature anomalies.
//!
//! The curve is a fixed heuristic, not a fitted classifier:
//!
//!   p(t) = 1 / (1 + exp(−(t − threshold) · steepness))
//!
//! with threshold = 1.5 °C and steepness = 2.0. A year is High Risk iff
//! p > 0.5, which is the same as t > threshold. NaN inputs yield NaN.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::TemperatureProjectionRecord;

/// Anomaly (°C) at which the curve crosses 0.5.
pub const RISK_THRESHOLD_C: f64 = 1.5;
pub const RISK_STEEPNESS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskCurve {
    pub threshold: f64,
    pub steepness: f64,
}

impl Default for RiskCurve {
    fn default() -> Self {
        Self {
            threshold: RISK_THRESHOLD_C,
            steepness: RISK_STEEPNESS,
        }
    }
}

impl RiskCurve {
    pub fn probability(&self, anomaly_c: f64) -> f64 {
        1.0 / (1.0 + (-(anomaly_c - self.threshold) * self.steepness).exp())
    }

    pub fn classify(&self, anomaly_c: f64) -> RiskLevel {
        RiskLevel::from_probability(self.probability(anomaly_c))
    }
}

/// Probability under the default curve.
pub fn risk_probability(anomaly_c: f64) -> f64 {
    RiskCurve::default().probability(anomaly_c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    HighRisk,
    Normal,
}

impl RiskLevel {
    pub fn from_probability(p: f64) -> Self {
        if p > 0.5 {
            RiskLevel::HighRisk
        } else {
            RiskLevel::Normal
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::HighRisk => f.write_str("High Risk"),
            RiskLevel::Normal => f.write_str("Normal"),
        }
    }
}

/// One row of the projected-risk table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub year: i32,
    pub projection: f64,
    pub probability: f64,
    pub level: RiskLevel,
}

/// Score every projected year, keeping input order.
pub fn assess_projections(records: &[TemperatureProjectionRecord], curve: &RiskCurve) -> Vec<RiskAssessment> {
    records
        .iter()
        .map(|r| {
            let probability = curve.probability(r.quadratic_projection);
            RiskAssessment {
                year: r.year,
                projection: r.quadratic_projection,
                probability,
                level: RiskLevel::from_probability(probability),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn projection(year: i32, t: f64) -> TemperatureProjectionRecord {
        TemperatureProjectionRecord {
            year,
            quadratic_projection: t,
            quadratic_ci_lower: t - 0.2,
            quadratic_ci_upper: t + 0.2,
            linear_projection: None,
            linear_ci_lower: None,
            linear_ci_upper: None,
        }
    }

    /// σ(0) = 0.5 at the 1.5°C threshold.
    #[test]
    fn threshold_maps_to_exactly_one_half() {
        assert_eq!(risk_probability(1.5), 0.5);
        assert_eq!(risk_probability(RISK_THRESHOLD_C), 0.5);
    }

    /// 1.61°C → p ≈ 0.555, High Risk.
    #[test]
    fn year_2025_projection_is_high_risk() {
        let p = risk_probability(1.61);
        assert_abs_diff_eq!(p, 1.0 / (1.0 + (-0.22f64).exp()), epsilon = 1e-12);
        assert_abs_diff_eq!(p, 0.5548, epsilon = 1e-4);
        assert_eq!(RiskCurve::default().classify(1.61), RiskLevel::HighRisk);
    }

    /// 1.40°C → p ≈ 0.450, Normal.
    #[test]
    fn year_2023_projection_is_normal() {
        let p = risk_probability(1.40);
        assert_abs_diff_eq!(p, 1.0 / (1.0 + 0.2f64.exp()), epsilon = 1e-12);
        assert_abs_diff_eq!(p, 0.4502, epsilon = 1e-4);
        assert_eq!(RiskCurve::default().classify(1.40), RiskLevel::Normal);
    }

    /// Classification is strict: p = 0.5 stays Normal.
    #[test]
    fn threshold_itself_is_normal() {
        assert_eq!(RiskCurve::default().classify(1.5), RiskLevel::Normal);
    }

    #[test]
    fn extremes_saturate_without_nan() {
        assert_eq!(risk_probability(-1e6), 0.0);
        assert_eq!(risk_probability(1e6), 1.0);
    }

    /// NaN in, NaN out, classified Normal.
    #[test]
    fn nan_propagates() {
        assert!(risk_probability(f64::NAN).is_nan());
        assert_eq!(RiskCurve::default().classify(f64::NAN), RiskLevel::Normal);
    }

    #[test]
    fn custom_curve_moves_the_boundary() {
        let curve = RiskCurve { threshold: 2.0, steepness: 4.0 };
        assert_eq!(curve.probability(2.0), 0.5);
        assert_eq!(curve.classify(1.9), RiskLevel::Normal);
        assert_eq!(curve.classify(2.1), RiskLevel::HighRisk);
    }

    #[test]
    fn assessments_follow_input_order() {
        let rows = vec![projection(2023, 1.40), projection(2024, 1.50), projection(2025, 1.61)];
        let out = assess_projections(&rows, &RiskCurve::default());
        assert_eq!(out.iter().map(|a| a.year).collect::<Vec<_>>(), vec![2023, 2024, 2025]);
        assert_eq!(
            out.iter().map(|a| a.level).collect::<Vec<_>>(),
            vec![RiskLevel::Normal, RiskLevel::Normal, RiskLevel::HighRisk]
        );
        assert_eq!(out[2].projection, 1.61);
    }

    #[test]
    fn level_display_labels() {
        assert_eq!(RiskLevel::HighRisk.to_string(), "High Risk");
        assert_eq!(RiskLevel::Normal.to_string(), "Normal");
    }

    proptest! {
        /// Warmer projections never lower the probability.
        #[test]
        fn probability_is_monotone(a in -20.0f64..20.0, b in -20.0f64..20.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(risk_probability(lo) <= risk_probability(hi));
        }

        /// Output stays within [0, 1].
        #[test]
        fn probability_stays_in_unit_interval(t in -50.0f64..50.0) {
            let p = risk_probability(t);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        /// High Risk exactly when the projection exceeds the threshold.
        #[test]
        fn high_risk_iff_above_threshold(t in -5.0f64..8.0) {
            prop_assert_eq!(risk_probability(t) > 0.5, t > RISK_THRESHOLD_C);
        }
    }
}
