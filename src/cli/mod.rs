//! Command-line parsing for the moment/density tool.
//!
//! Argument parsing and command dispatch stay separate from the math; the
//! defaults reproduce the reference run (μ=2, σ²=3, a=3, b=2.5, order 5,
//! target `3x - 2.5`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::TargetKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "pce",
    version,
    about = "Polynomial-chaos moments and affine density transforms for a Gaussian input"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate mean and variance of f(X) by quadrature (and optionally Monte Carlo).
    Moments(RunArgs),
    /// Plot f_X and f_Y for Y = aX + b, and optionally export SVG/JSON.
    Density(RunArgs),
    /// Do both.
    Run(RunArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Mean of the Gaussian input.
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    pub mu: f64,

    /// Variance of the Gaussian input.
    #[arg(long, default_value_t = 3.0)]
    pub variance: f64,

    /// Maximum polynomial order of the chaos expansion.
    #[arg(short = 'p', long, default_value_t = 5)]
    pub order: usize,

    /// Scale factor of the affine map Y = aX + b.
    #[arg(short = 'a', long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub a: f64,

    /// Offset of the affine map Y = aX + b.
    #[arg(short = 'b', long, default_value_t = 2.5, allow_negative_numbers = true)]
    pub b: f64,

    /// Target function f.
    #[arg(long, value_enum, default_value_t = TargetKind::Affine)]
    pub target: TargetKind,

    /// Slope of the affine target.
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    pub slope: f64,

    /// Intercept of the affine target.
    #[arg(long, default_value_t = -2.5, allow_negative_numbers = true)]
    pub intercept: f64,

    /// Also run a Monte Carlo baseline with N samples (bare `--mc` uses 900000).
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "900000")]
    pub mc: Option<usize>,

    /// Random seed for the Monte Carlo baseline.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Left edge of the plotted range.
    #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Right edge of the plotted range.
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Number of grid points per density curve.
    #[arg(long, default_value_t = 100)]
    pub points: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write the density chart as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// Export the sampled density curves to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Curve JSON file produced by `pce density --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also write the chart as SVG.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}
