//! Formatted terminal output.
//!
//! Formatting lives here so the estimation code stays free of presentation
//! concerns and output changes stay localized.

use crate::density::DensityTransformer;
use crate::domain::{MomentResult, RunConfig};
use crate::estimate::MomentEstimate;

/// Moment comparison table, with the closed form when one is known.
pub fn format_moment_summary(
    config: &RunConfig,
    estimates: &[MomentEstimate],
    exact: Option<MomentResult>,
) -> String {
    let mut out = String::new();

    out.push_str("=== pce - moments of f(X) ===\n");
    out.push_str(&format!(
        "Input: X ~ N(mu={}, sigma^2={}) | order={}\n",
        config.mean, config.variance, config.order
    ));
    out.push_str(&format!("Target: f(x) = {}\n\n", config.target.describe()));

    out.push_str(&format!(
        "{:<32} {:>16} {:>16}\n",
        "method", "mean", "variance"
    ));
    for e in estimates {
        out.push_str(&format!(
            "{:<32} {:>16.10} {:>16.10}\n",
            e.method, e.result.mean, e.result.variance
        ));
    }
    if let Some(exact) = exact {
        out.push_str(&format!(
            "{:<32} {:>16.10} {:>16.10}\n",
            "Closed form", exact.mean, exact.variance
        ));
    }

    out
}

/// Input/output distribution summary for the affine density transform.
pub fn format_density_summary(transformer: &DensityTransformer) -> String {
    let input = transformer.input_parameter();
    let output = transformer.output_parameter();
    let map = transformer.map();

    let mut out = String::new();
    out.push_str("=== pce - density of Y = aX + b ===\n");
    out.push_str(&format!("Map: a={}, b={}\n", map.a(), map.b()));
    out.push_str(&format!(
        "X ~ N(mu={:.6}, sigma^2={:.6})\n",
        input.mean(),
        input.variance()
    ));
    out.push_str(&format!(
        "Y ~ N(mu={:.6}, sigma^2={:.6})\n",
        output.mean(),
        output.variance()
    ));
    out
}
