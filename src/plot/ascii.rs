//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, one glyph per series, deterministic output.
//! Series are drawn in order; later series never overwrite earlier glyphs.

use crate::error::AppError;
use crate::plot::{DensityPlot, DensityRenderer};

/// Glyphs assigned to series in order (cycled).
const GLYPHS: [char; 4] = ['-', '*', '+', '#'];

/// Renders into an in-memory string; read it back with `output()`.
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    output: String,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            output: String::new(),
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

impl DensityRenderer for AsciiRenderer {
    fn render(&mut self, plot: &DensityPlot<'_>) -> Result<(), AppError> {
        let (x0, x1) = plot.x_range;
        if !(x0.is_finite() && x1.is_finite() && x1 > x0) {
            return Err(AppError::configuration(format!(
                "Invalid plot range [{x0}, {x1}]."
            )));
        }
        self.output = render_plot(plot, self.width, self.height);
        Ok(())
    }
}

fn render_plot(plot: &DensityPlot<'_>, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let (x_min, x_max) = plot.x_range;

    let (y_min, y_max) = plot.y_range().unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for (idx, series) in plot.series.iter().enumerate() {
        let glyph = GLYPHS[idx % GLYPHS.len()];
        draw_curve(&mut grid, series.points, (x_min, x_max), (y_min, y_max), glyph);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | density=[{y_min:.4}, {y_max:.4}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (idx, series) in plot.series.iter().enumerate() {
        let glyph = GLYPHS[idx % GLYPHS.len()];
        out.push_str(&format!("  {glyph} {}\n", series.label));
    }
    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the chart.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
    ch: char,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in curve {
        if x < x_min || x > x_max || !y.is_finite() {
            // Break the line across points we can't place.
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
