//! Densities of affinely transformed variables.
//!
//! For an invertible map `Y = a·X + b` the change-of-variables rule is
//!
//! ```text
//! f_Y(y) = f_X((y - b) / a) / |a|
//! ```
//!
//! `ChangeOfVariables` applies this to any input density. For a Gaussian
//! input the result is again Gaussian, `N(a·μ + b, a²·σ²)`, and
//! `DensityTransformer` evaluates that closed form directly.

use log::debug;

use crate::density::{Density, GaussianDensity};
use crate::domain::{AffineMap, DensityCurve, GaussianParameter};
use crate::error::AppError;
use crate::plot::{DensityPlot, DensityRenderer, PlotSeries};

/// Plot range used when the caller has no preference.
pub const DEFAULT_PLOT_RANGE: (f64, f64) = (-20.0, 40.0);

pub const INPUT_LABEL: &str = "f_X(x)";
pub const OUTPUT_LABEL: &str = "f_Y(y)";
pub const PLOT_TITLE: &str = "Density of X and Y = aX + b";

/// General change of variables through an affine map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeOfVariables<D> {
    input: D,
    map: AffineMap,
}

impl<D: Density> ChangeOfVariables<D> {
    pub fn new(input: D, map: AffineMap) -> Self {
        Self { input, map }
    }
}

impl<D: Density> Density for ChangeOfVariables<D> {
    fn pdf(&self, y: f64) -> f64 {
        self.input.pdf(self.map.inverse(y)) * self.map.inverse_jacobian()
    }
}

/// Gaussian input pushed through an affine map.
///
/// The input and output distributions are kept as separate values; the
/// transformer never rewrites its input parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityTransformer {
    map: AffineMap,
    input: GaussianDensity,
    output: GaussianDensity,
}

impl DensityTransformer {
    pub fn new(input: GaussianParameter, map: AffineMap) -> Self {
        let output = map.push_forward(&input);
        debug!(
            "density transform: input N({}, {}) -> output N({}, {})",
            input.mean(),
            input.variance(),
            output.mean(),
            output.variance()
        );
        Self {
            map,
            input: GaussianDensity::new(input),
            output: GaussianDensity::new(output),
        }
    }

    /// Build from raw coefficients; `a == 0` is a configuration error.
    pub fn from_coefficients(input: GaussianParameter, a: f64, b: f64) -> Result<Self, AppError> {
        Ok(Self::new(input, AffineMap::new(a, b)?))
    }

    pub fn map(&self) -> &AffineMap {
        &self.map
    }

    pub fn input_parameter(&self) -> &GaussianParameter {
        self.input.parameter()
    }

    pub fn output_parameter(&self) -> &GaussianParameter {
        self.output.parameter()
    }

    /// `f_X(x)`.
    pub fn density_input(&self, x: f64) -> f64 {
        self.input.pdf(x)
    }

    /// `f_Y(y)` from the closed-form output Gaussian.
    pub fn density_output(&self, y: f64) -> f64 {
        self.output.pdf(y)
    }

    /// Generic change-of-variables view of the same output density.
    pub fn change_of_variables(&self) -> ChangeOfVariables<GaussianDensity> {
        ChangeOfVariables::new(self.input, self.map)
    }

    /// Sample `f_Y` on a linear grid of `n_points` over `range` (inclusive).
    pub fn sample_curve(&self, range: (f64, f64), n_points: usize) -> Result<DensityCurve, AppError> {
        sample_density(&self.output, OUTPUT_LABEL, range, n_points)
    }

    /// Sample `f_X` on a linear grid of `n_points` over `range` (inclusive).
    pub fn sample_input_curve(&self, range: (f64, f64), n_points: usize) -> Result<DensityCurve, AppError> {
        sample_density(&self.input, INPUT_LABEL, range, n_points)
    }

    /// Hand both density curves to `renderer`.
    pub fn plot(
        &self,
        renderer: &mut dyn DensityRenderer,
        range: (f64, f64),
        n_points: usize,
    ) -> Result<(), AppError> {
        let input = self.sample_input_curve(range, n_points)?;
        let output = self.sample_curve(range, n_points)?;
        let plot = DensityPlot {
            title: PLOT_TITLE,
            x_range: range,
            series: vec![
                PlotSeries { label: &input.label, points: &input.points },
                PlotSeries { label: &output.label, points: &output.points },
            ],
        };
        renderer.render(&plot)
    }
}

/// Sample any density on an inclusive linear grid.
pub fn sample_density(
    density: &dyn Density,
    label: &str,
    range: (f64, f64),
    n_points: usize,
) -> Result<DensityCurve, AppError> {
    let (lo, hi) = range;
    // A finite range can still have a width that overflows to infinity.
    if !(lo.is_finite() && hi.is_finite() && hi > lo && (hi - lo).is_finite()) {
        return Err(AppError::configuration(format!(
            "Invalid curve range [{lo}, {hi}] (must be finite with hi > lo and a finite width)."
        )));
    }
    if n_points < 2 {
        return Err(AppError::configuration("Curve needs at least 2 points."));
    }

    let step = (hi - lo) / (n_points as f64 - 1.0);
    let points = (0..n_points)
        .map(|i| {
            // Pin the last sample to `hi` to avoid rounding drift.
            let x = if i + 1 == n_points { hi } else { lo + step * i as f64 };
            (x, density.pdf(x))
        })
        .collect();

    Ok(DensityCurve {
        label: label.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::error::ErrorKind;

    fn reference() -> DensityTransformer {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        DensityTransformer::from_coefficients(input, 3.0, 2.5).unwrap()
    }

    #[derive(Default)]
    struct Recorder {
        labels: Vec<String>,
        lens: Vec<usize>,
        x_range: Option<(f64, f64)>,
    }

    impl DensityRenderer for Recorder {
        fn render(&mut self, plot: &DensityPlot<'_>) -> Result<(), AppError> {
            self.x_range = Some(plot.x_range);
            for s in &plot.series {
                self.labels.push(s.label.to_string());
                self.lens.push(s.points.len());
            }
            Ok(())
        }
    }

    #[test]
    fn zero_scale_factor_is_a_configuration_error() {
        let input = GaussianParameter::new(2.0, 3.0).unwrap();
        let err = DensityTransformer::from_coefficients(input, 0.0, 2.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn output_parameters_are_distinct_from_input() {
        let t = reference();
        assert_relative_eq!(t.input_parameter().mean(), 2.0);
        assert_relative_eq!(t.input_parameter().variance(), 3.0);
        assert_relative_eq!(t.output_parameter().mean(), 8.5);
        assert_relative_eq!(t.output_parameter().variance(), 27.0);
    }

    #[test]
    fn closed_form_matches_change_of_variables() {
        let t = reference();
        let general = t.change_of_variables();
        for &y in &[-20.0, -3.0, 0.0, 8.5, 12.0, 40.0] {
            assert_relative_eq!(t.density_output(y), general.pdf(y), epsilon = 1e-15, max_relative = 1e-12);
        }
    }

    #[test]
    fn negative_scale_factor_uses_absolute_jacobian() {
        let input = GaussianParameter::new(1.0, 0.5).unwrap();
        let t = DensityTransformer::from_coefficients(input, -2.0, 1.0).unwrap();
        let general = t.change_of_variables();
        assert_relative_eq!(t.output_parameter().mean(), -1.0);
        assert_relative_eq!(t.density_output(0.3), general.pdf(0.3), max_relative = 1e-12);
        assert!(t.density_output(-1.0) > 0.0);
    }

    #[test]
    fn output_density_integrates_to_one() {
        let t = reference();
        let out = t.output_parameter();
        let half_width = 12.0 * out.std_dev();
        let curve = t
            .sample_curve((out.mean() - half_width, out.mean() + half_width), 4001)
            .unwrap();
        assert_relative_eq!(curve.integral(), 1.0, epsilon = 1e-6);

        let input_curve = t.sample_input_curve((-40.0, 44.0), 4001).unwrap();
        assert_relative_eq!(input_curve.integral(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn curve_grid_is_inclusive_and_increasing() {
        let curve = reference().sample_curve(DEFAULT_PLOT_RANGE, 100).unwrap();
        assert_eq!(curve.points.len(), 100);
        assert_eq!(curve.x_range(), Some((-20.0, 40.0)));
        assert!(curve.points.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(curve.label, OUTPUT_LABEL);
    }

    #[test]
    fn invalid_curve_requests_rejected() {
        let t = reference();
        assert!(t.sample_curve((1.0, 1.0), 10).is_err());
        assert!(t.sample_curve((0.0, f64::INFINITY), 10).is_err());
        assert!(t.sample_curve((0.0, 1.0), 1).is_err());
    }

    #[test]
    fn overflowing_range_width_rejected() {
        let err = reference().sample_curve((-1e308, 1e308), 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let curve = reference().sample_curve((-1e307, 1e307), 10).unwrap();
        assert!(curve.points.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn plot_hands_both_curves_to_renderer() {
        let mut recorder = Recorder::default();
        reference().plot(&mut recorder, DEFAULT_PLOT_RANGE, 50).unwrap();
        assert_eq!(recorder.labels, vec!["f_X(x)", "f_Y(y)"]);
        assert_eq!(recorder.lens, vec![50, 50]);
        assert_eq!(recorder.x_range, Some((-20.0, 40.0)));
    }
}
