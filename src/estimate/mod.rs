//! Moment estimation for `f(X)` with Gaussian `X`.
//!
//! Responsibilities:
//!
//! - build the polynomial index set (`basis`)
//! - fit a chaos expansion by Gauss–Hermite projection (`chaos`)
//! - sample a seeded Monte Carlo baseline in parallel (`montecarlo`)
//! - run providers side by side (`provider`)

pub mod basis;
pub mod chaos;
pub mod montecarlo;
pub mod provider;

pub use basis::*;
pub use chaos::*;
pub use montecarlo::*;
pub use provider::*;
