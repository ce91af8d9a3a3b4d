//! Probability densities and their affine transforms.

pub mod gaussian;
pub mod transform;

pub use gaussian::*;
pub use transform::*;

/// A probability density on the real line.
pub trait Density {
    fn pdf(&self, x: f64) -> f64;
}
