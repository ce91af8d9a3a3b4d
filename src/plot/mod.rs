//! Rendering of density curves.
//!
//! The density code never draws anything itself: it builds a `DensityPlot`
//! and hands it to a `DensityRenderer`. Front-ends pick the renderer (ASCII
//! for the terminal, SVG for files) and tests can record what was drawn.

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

use crate::error::AppError;

/// One labelled line.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub label: &'a str,
    pub points: &'a [(f64, f64)],
}

/// A render-only chart description.
#[derive(Debug, Clone)]
pub struct DensityPlot<'a> {
    pub title: &'a str,
    /// Horizontal bounds; points outside are not drawn.
    pub x_range: (f64, f64),
    pub series: Vec<PlotSeries<'a>>,
}

impl DensityPlot<'_> {
    /// `(min, max)` density over the points that fall inside `x_range`.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let (x0, x1) = self.x_range;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for s in &self.series {
            for &(x, y) in s.points {
                if x >= x0 && x <= x1 && y.is_finite() {
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
            Some((min_y, max_y))
        } else {
            None
        }
    }
}

/// Anything that can draw a `DensityPlot`.
pub trait DensityRenderer {
    fn render(&mut self, plot: &DensityPlot<'_>) -> Result<(), AppError>;
}
