//! Polynomial-chaos moment estimation by spectral projection.
//!
//! Given `X ~ N(μ, σ²)` we write `X = μ + σ·Z` and expand
//!
//! ```text
//! f(X) ≈ Σ_k c_k ψ_k(Z)        k = 0..=order
//! ```
//!
//! with orthonormal Hermite polynomials `ψ_k`. Each coefficient is a
//! projection `c_k = E[f(μ + σZ) ψ_k(Z)]`, approximated by Gauss–Hermite
//! quadrature with `order + 1` points. Orthonormality then gives:
//!
//! - `E[f(X)] ≈ c_0`
//! - `Var[f(X)] ≈ Σ_{k>=1} c_k²`
//!
//! The rule integrates degree `2·order + 1` exactly, so the projection of any
//! polynomial `f` of degree `<= order` is exact; in particular affine targets
//! are reproduced to rounding for every `order >= 1`.

use log::debug;

use crate::domain::{MomentResult, Parameter};
use crate::error::AppError;
use crate::estimate::basis::Basis;
use crate::math::{QuadratureRule, hermite_orthonormal, hermite_orthonormal_into};

/// A fitted one-dimensional chaos expansion.
#[derive(Debug, Clone)]
pub struct PolynomialChaos {
    parameter: Parameter,
    basis: Basis,
    coefficients: Vec<f64>,
}

impl PolynomialChaos {
    /// Project `f` onto the tensor basis of `parameter`.
    pub fn fit(f: impl Fn(f64) -> f64, parameter: &Parameter) -> Result<Self, AppError> {
        let basis = Basis::tensor(parameter);
        let rule = QuadratureRule::gauss_hermite(basis.quadrature_points())?;
        let xs = rule.scaled_nodes(parameter.input());

        let mut evaluations = Vec::with_capacity(xs.len());
        for &x in &xs {
            let fx = f(x);
            if !fx.is_finite() {
                return Err(AppError::numerical(format!(
                    "Target function returned a non-finite value ({fx}) at quadrature node x={x}."
                )));
            }
            evaluations.push(fx);
        }

        let coefficients = project(&rule, &evaluations, &basis)?;
        debug!(
            "chaos fit: order={}, points={}, coefficients={coefficients:?}",
            parameter.order(),
            rule.len()
        );

        Ok(Self {
            parameter: *parameter,
            basis,
            coefficients,
        })
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Orthonormal coefficients `c_0, ..., c_order`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn mean(&self) -> f64 {
        self.coefficients[0]
    }

    pub fn variance(&self) -> f64 {
        self.coefficients[1..].iter().map(|c| c * c).sum()
    }

    pub fn statistics(&self) -> MomentResult {
        MomentResult {
            mean: self.mean(),
            variance: self.variance(),
        }
    }

    /// Evaluate the surrogate polynomial at `x`, given in the units of `X`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let input = self.parameter.input();
        let z = (x - input.mean()) / input.std_dev();
        hermite_orthonormal(z, self.basis.max_degree())
            .iter()
            .zip(self.coefficients.iter())
            .map(|(psi, c)| psi * c)
            .sum()
    }
}

fn project(rule: &QuadratureRule, evaluations: &[f64], basis: &Basis) -> Result<Vec<f64>, AppError> {
    let degree = basis.max_degree();
    let mut coefficients = vec![0.0; basis.len()];
    let mut psi = vec![0.0; degree + 1];

    for ((z, w), fx) in rule.iter().zip(evaluations.iter()) {
        hermite_orthonormal_into(z, degree, &mut psi);
        for (slot, &k) in coefficients.iter_mut().zip(basis.indices()) {
            *slot += w * fx * psi[k];
        }
    }

    if let Some(k) = coefficients.iter().position(|c| !c.is_finite()) {
        return Err(AppError::numerical(format!(
            "Chaos coefficient c_{k} is non-finite; the projection is ill-conditioned."
        )));
    }
    Ok(coefficients)
}

/// Quadrature-based estimator of `{mean, variance}` of `f(X)`.
pub fn estimate_moments(f: impl Fn(f64) -> f64, parameter: &Parameter) -> Result<MomentResult, AppError> {
    Ok(PolynomialChaos::fit(f, parameter)?.statistics())
}
