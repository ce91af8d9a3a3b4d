//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - input parameters (`GaussianParameter`, `Parameter`, `AffineMap`)
//! - results (`MomentResult`, `DensityCurve`)
//! - CLI-facing configuration (`TargetFunction`, `RunConfig`)

pub mod types;

pub use types::*;
