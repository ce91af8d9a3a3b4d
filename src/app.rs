//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the moment and/or density workflows
//! - re-plots previously exported curve files
//! - prints reports/plots
//! - writes optional SVG/JSON exports

use clap::Parser;
use log::info;

use crate::cli::{Command, PlotArgs, RunArgs};
use crate::density::DensityTransformer;
use crate::domain::{RunConfig, TargetFunction};
use crate::error::AppError;
use crate::io::{CurveFile, read_curve_json, write_curve_json};
use crate::plot::{AsciiRenderer, DensityRenderer, SvgRenderer};

pub mod pipeline;

/// SVG canvas size in pixels.
const SVG_SIZE: (u32, u32) = (800, 600);

/// Entry point for the `pce` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Moments(args) => handle(&args, Workflow::Moments),
        Command::Density(args) => handle(&args, Workflow::Density),
        Command::Run(args) => handle(&args, Workflow::Both),
        Command::Plot(args) => handle_plot(&args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Workflow {
    Moments,
    Density,
    Both,
}

fn handle(args: &RunArgs, workflow: Workflow) -> Result<(), AppError> {
    let config = run_config_from_args(args);

    if workflow != Workflow::Density {
        let run = pipeline::run_moments(&config)?;
        println!(
            "{}",
            crate::report::format_moment_summary(&config, &run.estimates, run.exact)
        );
    }

    if workflow != Workflow::Moments {
        let run = pipeline::run_density(&config)?;
        println!("{}", crate::report::format_density_summary(&run.transformer));

        if config.plot {
            let mut ascii = AsciiRenderer::new(config.plot_width, config.plot_height);
            render_density(&run.transformer, &mut ascii, &config)?;
            println!("{}", ascii.output());
        }
        if let Some(path) = &config.svg {
            let mut svg = SvgRenderer::new(path, SVG_SIZE.0, SVG_SIZE.1);
            render_density(&run.transformer, &mut svg, &config)?;
            info!("wrote SVG chart to {}", path.display());
        }
        if let Some(path) = &config.export_curve {
            let file = CurveFile::new(&run.transformer, vec![run.input_curve, run.output_curve]);
            write_curve_json(path, &file)?;
            info!("wrote curve JSON to {}", path.display());
        }
    }

    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let curve = read_curve_json(&args.curve)?;
    info!(
        "loaded {} curve(s) from {}",
        curve.curves.len(),
        args.curve.display()
    );

    let mut ascii = AsciiRenderer::new(args.width, args.height);
    curve.plot(&mut ascii)?;
    println!("{}", ascii.output());

    if let Some(path) = &args.svg {
        let mut svg = SvgRenderer::new(path, SVG_SIZE.0, SVG_SIZE.1);
        curve.plot(&mut svg)?;
        info!("wrote SVG chart to {}", path.display());
    }
    Ok(())
}

/// Render with any renderer over the configured range and grid.
pub fn render_density(
    transformer: &DensityTransformer,
    renderer: &mut dyn DensityRenderer,
    config: &RunConfig,
) -> Result<(), AppError> {
    transformer.plot(renderer, (config.x_min, config.x_max), config.curve_points)
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        mean: args.mu,
        variance: args.variance,
        order: args.order,
        a: args.a,
        b: args.b,
        target: TargetFunction {
            kind: args.target,
            slope: args.slope,
            intercept: args.intercept,
        },
        mc_samples: args.mc,
        mc_seed: args.seed,
        x_min: args.x_min,
        x_max: args.x_max,
        curve_points: args.points,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        export_curve: args.export_curve.clone(),
    }
}

/// Rewrite argv so `pce` defaults to `pce run`.
///
/// Rules:
/// - `pce`                      -> `pce run`
/// - `pce --mu 1 ...`           -> `pce run --mu 1 ...`
/// - `pce --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "moments" | "density" | "run" | "plot");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}
