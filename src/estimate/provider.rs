//! Moment providers and side-by-side comparison.
//!
//! Quadrature and Monte Carlo are two independent strategies for the same
//! question: "what are the mean and variance of `f(X)`?" Both implement
//! `MomentProvider` so callers can run any set of them over the same target.

use log::info;

use crate::domain::{GaussianParameter, MomentResult, Parameter};
use crate::error::AppError;
use crate::estimate::chaos::estimate_moments;
use crate::estimate::montecarlo::MonteCarloEstimator;

/// Target functions must be shareable across worker threads.
pub type Target<'a> = &'a (dyn Fn(f64) -> f64 + Sync);

pub trait MomentProvider {
    /// Short label used in reports.
    fn name(&self) -> String;

    fn moments(&self, f: Target<'_>, input: &GaussianParameter) -> Result<MomentResult, AppError>;
}

/// Polynomial-chaos quadrature of a fixed maximum order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureProvider {
    pub order: usize,
}

impl MomentProvider for QuadratureProvider {
    fn name(&self) -> String {
        format!("Polynomial chaos (order {})", self.order)
    }

    fn moments(&self, f: Target<'_>, input: &GaussianParameter) -> Result<MomentResult, AppError> {
        let parameter = Parameter::gaussian(input.mean(), input.variance(), self.order)?;
        estimate_moments(f, &parameter)
    }
}

impl MomentProvider for MonteCarloEstimator {
    fn name(&self) -> String {
        format!("Monte Carlo (N={})", self.samples())
    }

    fn moments(&self, f: Target<'_>, input: &GaussianParameter) -> Result<MomentResult, AppError> {
        self.estimate(f, input)
    }
}

/// One provider's result in a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentEstimate {
    pub method: String,
    pub result: MomentResult,
}

/// Run every provider against the same target and input.
///
/// Fails on the first provider error; there are no partial comparisons.
pub fn compare_providers(
    providers: &[&dyn MomentProvider],
    f: Target<'_>,
    input: &GaussianParameter,
) -> Result<Vec<MomentEstimate>, AppError> {
    let mut out = Vec::with_capacity(providers.len());
    for provider in providers {
        let method = provider.name();
        let result = provider.moments(f, input)?;
        info!("{method}: mean={}, variance={}", result.mean, result.variance);
        out.push(MomentEstimate { method, result });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::error::ErrorKind;

    #[test]
    fn quadrature_provider_rejects_order_zero() {
        let input = GaussianParameter::new(0.0, 1.0).unwrap();
        let err = QuadratureProvider { order: 0 }
            .moments(&|x: f64| x, &input)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn providers_agree_on_affine_target() {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        let quad = QuadratureProvider { order: 5 };
        let mc = MonteCarloEstimator::new(100_000, 11).unwrap();
        let estimates = compare_providers(&[&quad, &mc], &|x: f64| 3.0 * x - 2.5, &input).unwrap();

        assert_eq!(estimates.len(), 2);
        assert_eq!(estimates[0].method, "Polynomial chaos (order 5)");
        assert_relative_eq!(estimates[0].result.mean, 3.5, epsilon = 1e-10);
        assert!((estimates[1].result.mean - 3.5).abs() < 0.1);
        assert!((estimates[1].result.variance - 27.0).abs() < 1.0);
    }

    #[test]
    fn increasing_order_does_not_lose_accuracy() {
        // exp(X), X ~ N(0.5, 0.25): closed-form moments are available.
        let input = GaussianParameter::new(0.5, 0.25).unwrap();
        let exact_mean = (0.5_f64 + 0.125).exp();
        let exact_var = (0.25_f64.exp() - 1.0) * (1.0_f64 + 0.25).exp();

        let mut prev_mean_err = f64::INFINITY;
        let mut prev_var_err = f64::INFINITY;
        for order in 1..=7 {
            let m = QuadratureProvider { order }
                .moments(&|x: f64| x.exp(), &input)
                .unwrap();
            let mean_err = (m.mean - exact_mean).abs();
            let var_err = (m.variance - exact_var).abs();
            assert!(mean_err <= prev_mean_err + 1e-12, "order {order}: mean error grew to {mean_err}");
            assert!(var_err <= prev_var_err + 1e-12, "order {order}: variance error grew to {var_err}");
            prev_mean_err = mean_err;
            prev_var_err = var_err;
        }
        assert!(prev_mean_err < 1e-10);
        assert!(prev_var_err < 1e-4);
    }

    #[test]
    fn high_order_quadrature_matches_monte_carlo_baseline() {
        let input = GaussianParameter::new(0.5, 0.25).unwrap();
        let f = |x: f64| x.exp();
        let quad = QuadratureProvider { order: 8 }.moments(&f, &input).unwrap();
        let mc = MonteCarloEstimator::new(400_000, 2024).unwrap().moments(&f, &input).unwrap();

        assert!((quad.mean - mc.mean).abs() < 0.01, "quad={quad:?} mc={mc:?}");
        assert!((quad.variance - mc.variance).abs() < 0.03, "quad={quad:?} mc={mc:?}");
    }
}
