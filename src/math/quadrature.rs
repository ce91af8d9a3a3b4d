//! Gauss–Hermite quadrature for the standard normal measure.
//!
//! Nodes and weights come from the Golub–Welsch algorithm: the `n`-point rule
//! is the eigen-decomposition of the symmetric tridiagonal Jacobi matrix of
//! the orthonormal Hermite recurrence,
//!
//! ```text
//! J[k, k]     = 0
//! J[k, k + 1] = J[k + 1, k] = sqrt(k + 1)
//! ```
//!
//! The nodes are the eigenvalues and each weight is the squared first
//! component of the matching normalized eigenvector (the zeroth moment of the
//! standard normal is 1, so the weights sum to 1).
//!
//! An `n`-point rule integrates polynomials up to degree `2n - 1` exactly.

use log::debug;
use nalgebra::{DMatrix, SymmetricEigen};

use crate::domain::GaussianParameter;
use crate::error::AppError;

/// Convergence tolerance for the symmetric eigen solver.
const EIGEN_EPS: f64 = 1e-15;

/// Iteration cap for the symmetric eigen solver (0 would mean "no limit").
const EIGEN_MAX_ITER: usize = 10_000;

/// Tolerance on `Σ w_i = 1` before we consider the rule broken.
const WEIGHT_SUM_TOL: f64 = 1e-10;

/// Quadrature rule for `Z ~ N(0, 1)`, nodes in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    /// Build the `points`-point Gauss–Hermite rule.
    pub fn gauss_hermite(points: usize) -> Result<Self, AppError> {
        if points == 0 {
            return Err(AppError::configuration("Quadrature needs at least one point."));
        }

        let mut jacobi = DMatrix::<f64>::zeros(points, points);
        for k in 0..points - 1 {
            let off = ((k + 1) as f64).sqrt();
            jacobi[(k, k + 1)] = off;
            jacobi[(k + 1, k)] = off;
        }

        let eigen = SymmetricEigen::try_new(jacobi, EIGEN_EPS, EIGEN_MAX_ITER).ok_or_else(|| {
            AppError::numerical(format!(
                "Jacobi eigen-decomposition did not converge for {points} points."
            ))
        })?;

        let mut pairs: Vec<(f64, f64)> = (0..points)
            .map(|i| {
                let v0 = eigen.eigenvectors[(0, i)];
                (eigen.eigenvalues[i], v0 * v0)
            })
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let rule = Self {
            nodes: pairs.iter().map(|p| p.0).collect(),
            weights: pairs.iter().map(|p| p.1).collect(),
        };
        rule.check()?;

        debug!(
            "gauss-hermite rule: points={points}, nodes={:?}, weights={:?}",
            rule.nodes, rule.weights
        );
        Ok(rule)
    }

    fn check(&self) -> Result<(), AppError> {
        let finite = self
            .nodes
            .iter()
            .chain(self.weights.iter())
            .all(|v| v.is_finite());
        if !finite {
            return Err(AppError::numerical("Quadrature rule contains non-finite values."));
        }
        let total: f64 = self.weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOL {
            return Err(AppError::numerical(format!(
                "Quadrature weights sum to {total}, expected 1."
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Standard-normal nodes `z_i`.
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `(node, weight)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }

    /// Nodes mapped to `x_i = μ + σ·z_i` for the given Gaussian.
    pub fn scaled_nodes(&self, input: &GaussianParameter) -> Vec<f64> {
        let sigma = input.std_dev();
        self.nodes.iter().map(|&z| input.mean() + sigma * z).collect()
    }

    /// `E[g(Z)]` under the rule.
    pub fn integrate(&self, g: impl Fn(f64) -> f64) -> f64 {
        self.iter().map(|(z, w)| w * g(z)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_point_rule_is_the_mean() {
        let rule = QuadratureRule::gauss_hermite(1).unwrap();
        assert_eq!(rule.nodes(), &[0.0]);
        assert_relative_eq!(rule.weights()[0], 1.0);
    }

    #[test]
    fn three_point_rule_known_values() {
        // Nodes 0, ±sqrt(3); weights 2/3, 1/6, 1/6.
        let rule = QuadratureRule::gauss_hermite(3).unwrap();
        let s3 = 3.0_f64.sqrt();
        assert_relative_eq!(rule.nodes()[0], -s3, epsilon = 1e-12);
        assert_relative_eq!(rule.nodes()[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rule.nodes()[2], s3, epsilon = 1e-12);
        assert_relative_eq!(rule.weights()[0], 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(rule.weights()[1], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(rule.weights()[2], 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn exact_for_normal_moments_up_to_degree_2n_minus_1() {
        // E[Z^k] = (k-1)!! for even k, 0 for odd k.
        let n = 6;
        let rule = QuadratureRule::gauss_hermite(n).unwrap();
        let mut double_factorial = 1.0;
        for k in 0..(2 * n) {
            let expected = if k % 2 == 1 {
                0.0
            } else {
                if k >= 2 {
                    double_factorial *= (k - 1) as f64;
                }
                double_factorial
            };
            let got = rule.integrate(|z| z.powi(k as i32));
            assert_relative_eq!(got, expected, epsilon = 1e-8, max_relative = 1e-10);
        }
    }

    #[test]
    fn nodes_ascending_and_symmetric() {
        let rule = QuadratureRule::gauss_hermite(8).unwrap();
        for w in rule.nodes().windows(2) {
            assert!(w[0] < w[1]);
        }
        let n = rule.len();
        for i in 0..n {
            assert_relative_eq!(rule.nodes()[i], -rule.nodes()[n - 1 - i], epsilon = 1e-10);
        }
    }

    #[test]
    fn zero_points_rejected() {
        assert!(QuadratureRule::gauss_hermite(0).is_err());
    }

    #[test]
    fn scaled_nodes_follow_mean_and_std_dev() {
        let rule = QuadratureRule::gauss_hermite(3).unwrap();
        let input = GaussianParameter::new(2.0, 4.0).unwrap();
        let xs = rule.scaled_nodes(&input);
        assert_relative_eq!(xs[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(xs[2], 2.0 + 2.0 * 3.0_f64.sqrt(), epsilon = 1e-12);
    }
}
