//! Read/write density curve JSON files.
//!
//! Curve JSON is the portable representation of a density run:
//! - input and output Gaussian parameters
//! - the affine map between them
//! - the sampled `f_X` and `f_Y` curves, ready for plotting elsewhere

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::density::{DensityTransformer, PLOT_TITLE};
use crate::domain::{AffineMap, DensityCurve, GaussianParameter};
use crate::error::AppError;
use crate::plot::{DensityPlot, DensityRenderer, PlotSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub input: GaussianParameter,
    pub map: AffineMap,
    pub output: GaussianParameter,
    pub curves: Vec<DensityCurve>,
}

impl CurveFile {
    pub fn new(transformer: &DensityTransformer, curves: Vec<DensityCurve>) -> Self {
        Self {
            tool: "pce".to_string(),
            input: *transformer.input_parameter(),
            map: *transformer.map(),
            output: *transformer.output_parameter(),
            curves,
        }
    }

    /// Check what the type system can't: a consistent output and well-formed curves.
    ///
    /// `input`, `map` and `output` are already validated field by field during
    /// deserialization.
    pub fn validate(&self) -> Result<(), AppError> {
        let expected = self.map.push_forward(&self.input);
        let close = |a: f64, b: f64| (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0);
        if !(close(expected.mean(), self.output.mean()) && close(expected.variance(), self.output.variance())) {
            return Err(AppError::configuration(format!(
                "Output N({}, {}) does not match the map applied to the input (expected N({}, {})).",
                self.output.mean(),
                self.output.variance(),
                expected.mean(),
                expected.variance()
            )));
        }

        if self.curves.is_empty() {
            return Err(AppError::configuration("Curve file contains no curves."));
        }
        for curve in &self.curves {
            if curve.points.len() < 2 {
                return Err(AppError::configuration(format!(
                    "Curve '{}' needs at least 2 points.",
                    curve.label
                )));
            }
            if curve.points.iter().any(|&(x, y)| !(x.is_finite() && y.is_finite())) {
                return Err(AppError::configuration(format!(
                    "Curve '{}' contains non-finite points.",
                    curve.label
                )));
            }
            if !curve.points.windows(2).all(|w| w[0].0 < w[1].0) {
                return Err(AppError::configuration(format!(
                    "Curve '{}' must have strictly increasing x.",
                    curve.label
                )));
            }
        }
        Ok(())
    }

    /// Smallest x range covering every stored curve.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.curves
            .iter()
            .filter_map(DensityCurve::x_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Hand the stored curves to `renderer`.
    pub fn plot(&self, renderer: &mut dyn DensityRenderer) -> Result<(), AppError> {
        let x_range = self
            .x_range()
            .ok_or_else(|| AppError::configuration("Curve file contains no curves."))?;
        let plot = DensityPlot {
            title: PLOT_TITLE,
            x_range,
            series: self
                .curves
                .iter()
                .map(|c| PlotSeries { label: &c.label, points: &c.points })
                .collect(),
        };
        renderer.render(&plot)
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create curve JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::io(format!("Failed to write curve JSON: {e}")))?;
    Ok(())
}

/// Read and validate a curve JSON file.
///
/// Unreadable or malformed files are I/O errors; well-formed JSON carrying
/// invalid values (e.g. `a == 0`, a non-positive variance) is a configuration error.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile = serde_json::from_reader(file).map_err(|e| {
        if e.is_data() {
            AppError::configuration(format!("Invalid curve JSON '{}': {e}", path.display()))
        } else {
            AppError::io(format!("Failed to read curve JSON '{}': {e}", path.display()))
        }
    })?;
    curve.validate()?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::DEFAULT_PLOT_RANGE;
    use crate::error::ErrorKind;
    use crate::plot::AsciiRenderer;

    fn reference_file() -> CurveFile {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        let t = DensityTransformer::from_coefficients(input, 3.0, 2.5).unwrap();
        let curves = vec![
            t.sample_input_curve(DEFAULT_PLOT_RANGE, 25).unwrap(),
            t.sample_curve(DEFAULT_PLOT_RANGE, 25).unwrap(),
        ];
        CurveFile::new(&t, curves)
    }

    fn load(text: &str) -> Result<CurveFile, AppError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.json");
        std::fs::write(&path, text).unwrap();
        read_curve_json(&path)
    }

    #[test]
    fn written_file_reloads_with_both_curves() {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        let t = DensityTransformer::from_coefficients(input, 3.0, 2.5).unwrap();
        let curves = vec![
            t.sample_input_curve(DEFAULT_PLOT_RANGE, 25).unwrap(),
            t.sample_curve(DEFAULT_PLOT_RANGE, 25).unwrap(),
        ];
        let file = CurveFile::new(&t, curves);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.json");
        write_curve_json(&path, &file).unwrap();
        let back = read_curve_json(&path).unwrap();

        assert_eq!(back.tool, "pce");
        assert_eq!(back.curves.len(), 2);
        assert_eq!(back.curves[1].label, "f_Y(y)");
        assert_eq!(back.output, *t.output_parameter());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_curve_json(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn zero_scale_factor_in_file_rejected() {
        let text = r#"{
            "tool": "pce",
            "input": {"mean": 2.0, "variance": 3.0},
            "map": {"a": 0.0, "b": 2.5},
            "output": {"mean": 2.5, "variance": 0.0},
            "curves": []
        }"#;
        let err = load(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn negative_variance_in_file_rejected() {
        let text = r#"{
            "tool": "pce",
            "input": {"mean": 2.0, "variance": -3.0},
            "map": {"a": 3.0, "b": 2.5},
            "output": {"mean": 8.5, "variance": 27.0},
            "curves": []
        }"#;
        let err = load(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn truncated_file_is_an_io_error() {
        let err = load(r#"{"tool": "pce", "input": {"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn inconsistent_output_rejected() {
        let mut file = reference_file();
        file.output = GaussianParameter::new(8.5, 3.0).unwrap();
        assert_eq!(file.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn decreasing_curve_rejected() {
        let mut file = reference_file();
        file.curves[0].points.reverse();
        assert_eq!(file.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn stored_curves_plot_over_their_range() {
        let file = reference_file();
        assert_eq!(file.x_range(), Some(DEFAULT_PLOT_RANGE));

        let mut ascii = AsciiRenderer::new(40, 10);
        file.plot(&mut ascii).unwrap();
        assert!(ascii.output().starts_with("Plot: x=[-20.000, 40.000]"));
        assert!(ascii.output().contains("  - f_X(x)"));
        assert!(ascii.output().contains("  * f_Y(y)"));
    }
}
