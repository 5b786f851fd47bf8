//! # Scalar Metrics
//!
//! A closed catalogue of the scalar summaries a tensor can be queried for by
//! name. Callers outside the crate (the CLI, module glue) select metrics with
//! [`ScalarMetric`] rather than calling individual methods, so the set of
//! available names lives in exactly one place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TensorError;
use crate::tensor::DyadicTensor;
use crate::tensor3d::Dyadic3DTensor;

/// A named scalar summary of a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarMetric {
    /// Root of the sum of squared components.
    FrobeniusNorm,
    /// Largest absolute component.
    MaxNorm,
    /// Sum of the diagonal.
    Trace,
    /// `(λ0 − λ1) / Σλ` (3-D only).
    LinearCertainty,
    /// `2 (λ1 − λ2) / Σλ` (3-D only).
    PlanarCertainty,
    /// `3 λ2 / Σλ` (3-D only).
    SphericalCertainty,
    /// Normalised eigenvalue spread (3-D only).
    FractionalAnisotropy,
    /// `Σλ / 3` (3-D only).
    MeanDiffusivity,
}

impl ScalarMetric {
    /// Every metric, in catalogue order.
    pub fn all() -> &'static [ScalarMetric] {
        &[
            Self::FrobeniusNorm,
            Self::MaxNorm,
            Self::Trace,
            Self::LinearCertainty,
            Self::PlanarCertainty,
            Self::SphericalCertainty,
            Self::FractionalAnisotropy,
            Self::MeanDiffusivity,
        ]
    }

    /// The metric's snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrobeniusNorm => "frobenius_norm",
            Self::MaxNorm => "max_norm",
            Self::Trace => "trace",
            Self::LinearCertainty => "linear_certainty",
            Self::PlanarCertainty => "planar_certainty",
            Self::SphericalCertainty => "spherical_certainty",
            Self::FractionalAnisotropy => "fractional_anisotropy",
            Self::MeanDiffusivity => "mean_diffusivity",
        }
    }

    /// Whether the metric is only defined for 3-D tensors.
    pub fn requires_3d(&self) -> bool {
        match self {
            Self::FrobeniusNorm | Self::MaxNorm | Self::Trace => false,
            Self::LinearCertainty
            | Self::PlanarCertainty
            | Self::SphericalCertainty
            | Self::FractionalAnisotropy
            | Self::MeanDiffusivity => true,
        }
    }

    /// Metrics defined for a tensor of the given dimension.
    pub fn applicable_to(dimension: usize) -> impl Iterator<Item = ScalarMetric> {
        Self::all()
            .iter()
            .copied()
            .filter(move |m| !m.requires_3d() || dimension == 3)
    }

    /// Evaluate on a generic tensor; 3-D metrics reject other dimensions.
    pub fn evaluate(&self, tensor: &DyadicTensor) -> Result<f64, TensorError> {
        match self {
            Self::FrobeniusNorm => Ok(tensor.frobenius_norm()),
            Self::MaxNorm => Ok(tensor.max_norm()),
            Self::Trace => Ok(tensor.trace()),
            _ => {
                let tensor = Dyadic3DTensor::try_from(tensor.clone())?;
                Ok(self.evaluate_3d(&tensor))
            }
        }
    }

    /// Evaluate on a 3-D tensor; every metric is defined.
    pub fn evaluate_3d(&self, tensor: &Dyadic3DTensor) -> f64 {
        match self {
            Self::FrobeniusNorm => tensor.frobenius_norm(),
            Self::MaxNorm => tensor.max_norm(),
            Self::Trace => tensor.trace(),
            Self::LinearCertainty => tensor.linear_certainty(),
            Self::PlanarCertainty => tensor.planar_certainty(),
            Self::SphericalCertainty => tensor.spherical_certainty(),
            Self::FractionalAnisotropy => tensor.fractional_anisotropy(),
            Self::MeanDiffusivity => tensor.mean_diffusivity(),
        }
    }
}

impl fmt::Display for ScalarMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// A metric name that is not in the catalogue.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown metric {0:?}")]
pub struct UnknownMetric(
    /// The rejected name, as given.
    pub String,
);

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    #[test]
    fn names_round_trip() {
        for metric in ScalarMetric::all() {
            assert_eq!(metric.as_str().parse::<ScalarMetric>().unwrap(), *metric);
            assert_eq!(metric.to_string(), metric.as_str());
        }
        assert_eq!(
            "Linear-Certainty".parse::<ScalarMetric>().unwrap(),
            ScalarMetric::LinearCertainty
        );
        assert_eq!(
            "anisotropy".parse::<ScalarMetric>(),
            Err(UnknownMetric("anisotropy".into()))
        );
    }

    #[test]
    fn certainties_on_unsorted_generic_eigens() {
        let axes = [
            DVector::from_column_slice(&[1.0, 0.0, 0.0]),
            DVector::from_column_slice(&[0.0, 1.0, 0.0]),
            DVector::from_column_slice(&[0.0, 0.0, 1.0]),
        ];
        let t = DyadicTensor::from_eigens(&axes, &[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(ScalarMetric::LinearCertainty.evaluate(&t), Ok(1.0 / 6.0));
        assert_eq!(ScalarMetric::PlanarCertainty.evaluate(&t), Ok(1.0 / 3.0));
        assert_eq!(ScalarMetric::SphericalCertainty.evaluate(&t), Ok(0.5));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ScalarMetric::MaxNorm).unwrap();
        assert_eq!(json, "\"max_norm\"");
    }

    #[test]
    fn norms_on_two_dimensional_tensor() {
        let t = DyadicTensor::from_eigenvectors(&[
            DVector::from_column_slice(&[3.0, 0.0]),
            DVector::from_column_slice(&[0.0, 6.0]),
        ])
        .unwrap();
        assert_eq!(ScalarMetric::FrobeniusNorm.evaluate(&t), Ok(45f64.sqrt()));
        assert_eq!(ScalarMetric::MaxNorm.evaluate(&t), Ok(6.0));
        assert_eq!(ScalarMetric::Trace.evaluate(&t), Ok(9.0));
        assert_eq!(
            ScalarMetric::LinearCertainty.evaluate(&t),
            Err(TensorError::DimensionMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn applicable_metrics_depend_on_dimension() {
        assert_eq!(ScalarMetric::applicable_to(2).count(), 3);
        assert_eq!(ScalarMetric::applicable_to(3).count(), ScalarMetric::all().len());
    }

    #[test]
    fn certainties_through_catalogue() {
        let t = Dyadic3DTensor::new(1.0, 0.0, 0.0, 5.0, 0.0, 2.0);
        let generic = t.as_tensor();
        assert_eq!(ScalarMetric::LinearCertainty.evaluate(generic), Ok(3.0 / 8.0));
        assert_eq!(ScalarMetric::PlanarCertainty.evaluate_3d(&t), 0.25);
        assert_eq!(ScalarMetric::MeanDiffusivity.evaluate_3d(&t), 8.0 / 3.0);
    }
}
