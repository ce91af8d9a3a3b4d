//! Shared computation pipeline used by every subcommand.
//!
//! The two workflows are independent and share only the input scalars:
//! - moments: parameter -> chaos fit (+ Monte Carlo) -> comparison
//! - density: input Gaussian + affine map -> closed-form output -> curves

use log::info;

use crate::density::DensityTransformer;
use crate::domain::{AffineMap, DensityCurve, GaussianParameter, MomentResult, RunConfig};
use crate::error::AppError;
use crate::estimate::{MomentEstimate, MomentProvider, MonteCarloEstimator, QuadratureProvider, compare_providers};

/// Outputs of the moment workflow.
#[derive(Debug, Clone)]
pub struct MomentRun {
    pub estimates: Vec<MomentEstimate>,
    /// Closed-form moments of the target, when known.
    pub exact: Option<MomentResult>,
}

/// Outputs of the density workflow.
#[derive(Debug, Clone)]
pub struct DensityRun {
    pub transformer: DensityTransformer,
    pub input_curve: DensityCurve,
    pub output_curve: DensityCurve,
}

pub fn run_moments(config: &RunConfig) -> Result<MomentRun, AppError> {
    let input = GaussianParameter::new(config.mean, config.variance)?;
    let target = config.target;
    let f = move |x: f64| target.eval(x);

    let quadrature = QuadratureProvider { order: config.order };
    let monte_carlo = config
        .mc_samples
        .map(|n| MonteCarloEstimator::new(n, config.mc_seed))
        .transpose()?;

    let mut providers: Vec<&dyn MomentProvider> = vec![&quadrature];
    if let Some(mc) = &monte_carlo {
        providers.push(mc);
    }

    info!(
        "estimating moments of f(x) = {} for X ~ N({}, {})",
        target.describe(),
        input.mean(),
        input.variance()
    );
    let estimates = compare_providers(&providers, &f, &input)?;

    Ok(MomentRun {
        estimates,
        exact: target.exact_moments(&input),
    })
}

pub fn run_density(config: &RunConfig) -> Result<DensityRun, AppError> {
    let input = GaussianParameter::new(config.mean, config.variance)?;
    let map = AffineMap::new(config.a, config.b)?;
    let transformer = DensityTransformer::new(input, map);

    let range = (config.x_min, config.x_max);
    let input_curve = transformer.sample_input_curve(range, config.curve_points)?;
    let output_curve = transformer.sample_curve(range, config.curve_points)?;
    info!(
        "sampled density curves on [{}, {}] with {} points",
        range.0, range.1, config.curve_points
    );

    Ok(DensityRun {
        transformer,
        input_curve,
        output_curve,
    })
}
