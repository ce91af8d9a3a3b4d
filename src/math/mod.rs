//! Mathematical utilities: Hermite basis functions and Gauss–Hermite quadrature.

pub mod basis;
pub mod quadrature;

pub use basis::*;
pub use quadrature::*;
