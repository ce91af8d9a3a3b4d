//! Plotters-powered SVG rendering of density curves.
//!
//! The chart is drawn into an in-memory SVG document first, then written to
//! disk in one go, so a failed render never leaves a truncated file behind.

use std::path::PathBuf;

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::{DensityPlot, DensityRenderer};

/// Line colors assigned to series in order (cycled).
const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 47),   // red
    RGBColor(38, 139, 210),  // blue
    RGBColor(133, 153, 0),   // green
    RGBColor(108, 113, 196), // violet
];

/// Writes an SVG chart to `path` on every render.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl SvgRenderer {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }
}

impl DensityRenderer for SvgRenderer {
    fn render(&mut self, plot: &DensityPlot<'_>) -> Result<(), AppError> {
        let svg = render_svg(plot, self.width, self.height)?;
        std::fs::write(&self.path, svg).map_err(|e| {
            AppError::io(format!("Failed to write SVG '{}': {e}", self.path.display()))
        })
    }
}

/// Render `plot` to an SVG document.
pub fn render_svg(plot: &DensityPlot<'_>, width: u32, height: u32) -> Result<String, AppError> {
    let (x0, x1) = plot.x_range;
    if !(x0.is_finite() && x1.is_finite() && x1 > x0) {
        return Err(AppError::configuration(format!("Invalid plot range [{x0}, {x1}].")));
    }
    if width < 64 || height < 64 {
        return Err(AppError::configuration(format!(
            "SVG size {width}x{height} is too small (minimum 64x64)."
        )));
    }

    // Densities are non-negative, so anchor the axis at zero.
    let y1 = plot.y_range().map(|(_, max)| max * 1.05).unwrap_or(1.0);

    let mut svg = String::new();
    draw_chart(&mut svg, plot, (width, height), (x0, x1), (0.0, y1))
        .map_err(|e| AppError::io(format!("Failed to render SVG chart: {e}")))?;
    Ok(svg)
}

fn draw_chart(
    buffer: &mut String,
    plot: &DensityPlot<'_>,
    size: (u32, u32),
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::with_string(buffer, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(plot.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("density")
        .x_labels(7)
        .y_labels(6)
        .y_label_formatter(&|v| format!("{v:.3}"))
        .draw()?;

    for (idx, series) in plot.series.iter().enumerate() {
        let color = COLORS[idx % COLORS.len()];
        let visible = series
            .points
            .iter()
            .copied()
            .filter(|&(x, y)| x >= x0 && x <= x1 && y.is_finite());
        chart
            .draw_series(LineSeries::new(visible, color.stroke_width(2)))?
            .label(series.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
