//! Normal probability density.

use std::f64::consts::PI;

use crate::density::Density;
use crate::domain::GaussianParameter;

/// `N(μ, σ²)` density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianDensity {
    parameter: GaussianParameter,
    norm: f64,
}

impl GaussianDensity {
    pub fn new(parameter: GaussianParameter) -> Self {
        let norm = 1.0 / (2.0 * PI * parameter.variance()).sqrt();
        Self { parameter, norm }
    }

    pub fn parameter(&self) -> &GaussianParameter {
        &self.parameter
    }
}

impl Density for GaussianDensity {
    fn pdf(&self, x: f64) -> f64 {
        let d = x - self.parameter.mean();
        self.norm * (-(d * d) / (2.0 * self.parameter.variance())).exp()
    }
}
