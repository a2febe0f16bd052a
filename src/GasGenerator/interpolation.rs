//! Piecewise-linear 1-D interpolation over tabulated curves.
//!
//! Outside the tabulated span the first or last segment is continued linearly;
//! values are never clamped to the edge of the table.
use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::enums::Strategy1DEnum,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error("at least 2 points are needed, got {0}")]
    TooFewPoints(usize),
    #[error("abscissa has {x} points, ordinate has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("abscissa value {0} appears more than once")]
    DuplicateAbscissa(f64),
    #[error("non-finite value in curve data")]
    NonFinite,
    #[error(transparent)]
    Validation(#[from] ValidateError),
    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}

/// Linear interpolator with linear extrapolation on both sides
pub struct LinearInterpolator(Interp1DOwned<f64, Strategy1DEnum>);

impl LinearInterpolator {
    /// Pairs do not need to be ordered: they are sorted by `x` before the grid is built.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, InterpError> {
        if x.len() != y.len() {
            return Err(InterpError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(InterpError::TooFewPoints(x.len()));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(InterpError::NonFinite);
        }
        let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(InterpError::DuplicateAbscissa(w[0].0));
        }
        let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        Ok(Self(Interp1DOwned::new(
            Array1::from_vec(xs),
            Array1::from_vec(ys),
            ninterp::strategy::Linear.into(),
            Extrapolate::Enable,
        )?))
    }

    pub fn eval(&self, x: f64) -> Result<f64, InterpError> {
        self.0.interpolate(&[x]).map_err(Into::into)
    }
}

/// Straight line through (x0, y0) and (x1, y1) evaluated at `x`; `y0` when the nodes coincide.
pub fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    if x1 == x0 {
        y0
    } else {
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}
