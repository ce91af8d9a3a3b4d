//! `pce-density` library crate.
//!
//! The binary (`pce`) is a thin wrapper around this library so that:
//!
//! - the estimators and density transforms are testable without spawning processes
//! - renderers can be swapped or mocked
//! - the moment and density workflows stay independent of each other

pub mod app;
pub mod cli;
pub mod density;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
