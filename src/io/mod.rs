//! Input/output helpers.
//!
//! - density curve JSON read/write (`curve`)

pub mod curve;

pub use curve::*;
