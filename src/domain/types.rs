//! Shared domain types.
//!
//! All values here are immutable once constructed. Constructors validate their
//! inputs so that downstream math can assume finite, well-formed parameters.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Input distribution family.
///
/// Only the Gaussian family is supported; the enum exists so that results and
/// exports carry the family explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Gaussian,
}

/// Mean and variance of a scalar Gaussian.
///
/// Deserialization goes through [`GaussianParameter::new`], so a loaded value
/// obeys the same rules as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGaussian")]
pub struct GaussianParameter {
    mean: f64,
    variance: f64,
}

#[derive(Deserialize)]
struct RawGaussian {
    mean: f64,
    variance: f64,
}

impl TryFrom<RawGaussian> for GaussianParameter {
    type Error = AppError;

    fn try_from(raw: RawGaussian) -> Result<Self, Self::Error> {
        Self::new(raw.mean, raw.variance)
    }
}

impl GaussianParameter {
    pub fn new(mean: f64, variance: f64) -> Result<Self, AppError> {
        if !mean.is_finite() {
            return Err(AppError::configuration(format!("Mean must be finite, got {mean}.")));
        }
        if !(variance.is_finite() && variance > 0.0) {
            return Err(AppError::configuration(format!(
                "Variance must be finite and > 0, got {variance}."
            )));
        }
        Ok(Self { mean, variance })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// A scalar uncertain input for polynomial-chaos estimation.
///
/// `order` is the maximum polynomial degree retained in the expansion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameter {
    distribution: Distribution,
    gaussian: GaussianParameter,
    order: usize,
}

impl Parameter {
    /// Gaussian parameter with mean `mean`, variance `variance`, and maximum order `order`.
    pub fn gaussian(mean: f64, variance: f64, order: usize) -> Result<Self, AppError> {
        if order < 1 {
            return Err(AppError::configuration(format!(
                "Polynomial order must be >= 1, got {order}."
            )));
        }
        Ok(Self {
            distribution: Distribution::Gaussian,
            gaussian: GaussianParameter::new(mean, variance)?,
            order,
        })
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn input(&self) -> &GaussianParameter {
        &self.gaussian
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

/// Invertible affine map `y = a·x + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAffineMap")]
pub struct AffineMap {
    a: f64,
    b: f64,
}

#[derive(Deserialize)]
struct RawAffineMap {
    a: f64,
    b: f64,
}

impl TryFrom<RawAffineMap> for AffineMap {
    type Error = AppError;

    fn try_from(raw: RawAffineMap) -> Result<Self, Self::Error> {
        Self::new(raw.a, raw.b)
    }
}

impl AffineMap {
    pub fn new(a: f64, b: f64) -> Result<Self, AppError> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(AppError::configuration(format!(
                "Affine coefficients must be finite, got a={a}, b={b}."
            )));
        }
        if a == 0.0 {
            return Err(AppError::configuration(
                "Scale factor a must be non-zero: the map is not invertible and the change of variables is undefined.",
            ));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn apply(&self, x: f64) -> f64 {
        self.a * x + self.b
    }

    pub fn inverse(&self, y: f64) -> f64 {
        (y - self.b) / self.a
    }

    /// `|dx/dy|` for the inverse map.
    pub fn inverse_jacobian(&self) -> f64 {
        1.0 / self.a.abs()
    }

    /// Push a Gaussian through the map: `N(a·μ + b, a²·σ²)`.
    pub fn push_forward(&self, input: &GaussianParameter) -> GaussianParameter {
        GaussianParameter {
            mean: self.apply(input.mean),
            variance: self.a * self.a * input.variance,
        }
    }
}

/// Estimated moments of `f(X)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentResult {
    pub mean: f64,
    pub variance: f64,
}

impl MomentResult {
    pub fn std_dev(&self) -> f64 {
        self.variance.max(0.0).sqrt()
    }
}

/// Density samples over a grid with strictly increasing x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl DensityCurve {
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.0, last.0))
    }

    /// Trapezoidal integral of the sampled density.
    pub fn integral(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| 0.5 * (w[1].0 - w[0].0) * (w[0].1 + w[1].1))
            .sum()
    }
}

/// Built-in target functions for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// `slope·x + intercept`.
    Affine,
    /// `x²`.
    Square,
    /// `exp(x)`.
    Exp,
    /// `sin(x)`.
    Sin,
}

/// A target function plus its coefficients (only used by `Affine`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetFunction {
    pub kind: TargetKind,
    pub slope: f64,
    pub intercept: f64,
}

impl TargetFunction {
    pub fn eval(&self, x: f64) -> f64 {
        match self.kind {
            TargetKind::Affine => self.slope * x + self.intercept,
            TargetKind::Square => x * x,
            TargetKind::Exp => x.exp(),
            TargetKind::Sin => x.sin(),
        }
    }

    pub fn describe(&self) -> String {
        match self.kind {
            TargetKind::Affine => format!("{}*x + {}", self.slope, self.intercept),
            TargetKind::Square => "x^2".to_string(),
            TargetKind::Exp => "exp(x)".to_string(),
            TargetKind::Sin => "sin(x)".to_string(),
        }
    }

    /// Exact moments of `f(X)` for `X ~ N(μ, σ²)`, when a closed form is known.
    pub fn exact_moments(&self, input: &GaussianParameter) -> Option<MomentResult> {
        let mu = input.mean();
        let v = input.variance();
        match self.kind {
            TargetKind::Affine => Some(MomentResult {
                mean: self.slope * mu + self.intercept,
                variance: self.slope * self.slope * v,
            }),
            TargetKind::Square => Some(MomentResult {
                mean: mu * mu + v,
                variance: 4.0 * mu * mu * v + 2.0 * v * v,
            }),
            TargetKind::Exp => Some(MomentResult {
                mean: (mu + v / 2.0).exp(),
                variance: (v.exp() - 1.0) * (2.0 * mu + v).exp(),
            }),
            TargetKind::Sin => {
                // E[e^{iX}] = e^{iμ - v/2}; E[sin²X] = (1 - E[cos 2X]) / 2.
                let mean = mu.sin() * (-v / 2.0).exp();
                let second = 0.5 * (1.0 - (2.0 * mu).cos() * (-2.0 * v).exp());
                Some(MomentResult {
                    mean,
                    variance: second - mean * mean,
                })
            }
        }
    }
}

/// Configuration for a single `pce` run, resolved from CLI arguments.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mean: f64,
    pub variance: f64,
    pub order: usize,
    pub a: f64,
    pub b: f64,
    pub target: TargetFunction,

    /// Monte Carlo sample count; `None` skips the Monte Carlo comparison.
    pub mc_samples: Option<usize>,
    pub mc_seed: u64,

    pub x_min: f64,
    pub x_max: f64,
    pub curve_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::error::ErrorKind;

    #[test]
    fn order_zero_is_a_configuration_error() {
        let err = Parameter::gaussian(2.0, 3.0, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn non_positive_variance_rejected() {
        assert!(GaussianParameter::new(0.0, 0.0).is_err());
        assert!(GaussianParameter::new(0.0, -1.0).is_err());
        assert!(GaussianParameter::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn zero_scale_factor_rejected() {
        let err = AffineMap::new(0.0, 2.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn deserialization_applies_constructor_checks() {
        assert!(serde_json::from_str::<AffineMap>(r#"{"a":0.0,"b":2.5}"#).is_err());
        assert!(serde_json::from_str::<GaussianParameter>(r#"{"mean":2.0,"variance":-3.0}"#).is_err());

        let map: AffineMap = serde_json::from_str(r#"{"a":3.0,"b":2.5}"#).unwrap();
        assert_eq!(map, AffineMap::new(3.0, 2.5).unwrap());
        let input: GaussianParameter = serde_json::from_str(r#"{"mean":2.0,"variance":3.0}"#).unwrap();
        assert_eq!(input, GaussianParameter::new(2.0, 3.0).unwrap());
    }

    #[test]
    fn push_forward_keeps_input_untouched() {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        let map = AffineMap::new(3.0, 2.5).unwrap();
        let output = map.push_forward(&input);

        assert_relative_eq!(output.mean(), 8.5);
        assert_relative_eq!(output.variance(), 27.0);
        assert_relative_eq!(input.mean(), 2.0);
        assert_relative_eq!(input.variance(), 3.0);
    }

    #[test]
    fn inverse_round_trips_through_apply() {
        let map = AffineMap::new(-2.0, 1.0).unwrap();
        assert_relative_eq!(map.inverse(map.apply(0.75)), 0.75);
        assert_relative_eq!(map.inverse_jacobian(), 0.5);
    }

    #[test]
    fn curve_integral_of_constant() {
        let curve = DensityCurve {
            label: "flat".to_string(),
            points: vec![(0.0, 0.5), (1.0, 0.5), (2.0, 0.5)],
        };
        assert_relative_eq!(curve.integral(), 1.0);
        assert_eq!(curve.x_range(), Some((0.0, 2.0)));
    }

    #[test]
    fn exact_square_moments() {
        let input = GaussianParameter::new(1.0, 2.0).unwrap();
        let f = TargetFunction { kind: TargetKind::Square, slope: 0.0, intercept: 0.0 };
        let m = f.exact_moments(&input).unwrap();
        assert_relative_eq!(m.mean, 3.0);
        assert_relative_eq!(m.variance, 16.0);
    }
}
