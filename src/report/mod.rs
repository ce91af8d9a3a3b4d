//! Reporting utilities: formatted moment and density summaries.

pub mod format;

pub use format::*;
