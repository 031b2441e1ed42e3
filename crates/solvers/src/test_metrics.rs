//! Metrics with closed-form geodesics, for testing solvers.

use ndarray::{ArrayD, Axis, Zip};
use tangent_core::{Metric, StateError, state};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum MetricError {
    #[error("position outside the metric's domain")]
    OutsideDomain,

    #[error(transparent)]
    State(#[from] StateError),
}

/// Flat space, where geodesics are straight lines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Euclidean {
    dim: usize,
}

impl Euclidean {
    pub(crate) fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Metric for Euclidean {
    type Error = MetricError;

    fn dim(&self) -> usize {
        self.dim
    }

    fn geodesic_equation(
        &self,
        state: &ArrayD<f64>,
        _time: f64,
    ) -> Result<ArrayD<f64>, Self::Error> {
        state::position(&state.view())?;
        let velocity = state.index_axis(Axis(0), 1);

        let mut derivative = ArrayD::zeros(state.raw_dim());
        derivative.index_axis_mut(Axis(0), 0).assign(&velocity);
        Ok(derivative)
    }
}

/// The positive half-line with metric `g(x) = 1 / x^2`.
///
/// Geodesics satisfy `x'' = x'^2 / x`, so `exp_p(v) = p * exp(v / p)` and
/// `log_p(q) = p * ln(q / p)`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HalfLine;

impl Metric for HalfLine {
    type Error = MetricError;

    fn dim(&self) -> usize {
        1
    }

    fn geodesic_equation(
        &self,
        state: &ArrayD<f64>,
        _time: f64,
    ) -> Result<ArrayD<f64>, Self::Error> {
        let position = state::position(&state.view())?;
        if position.iter().any(|&x| x <= 0.0 || !x.is_finite()) {
            return Err(MetricError::OutsideDomain);
        }
        let velocity = state.index_axis(Axis(0), 1);

        let mut derivative = ArrayD::zeros(state.raw_dim());
        derivative.index_axis_mut(Axis(0), 0).assign(&velocity);
        Zip::from(derivative.index_axis_mut(Axis(0), 1))
            .and(&position)
            .and(&velocity)
            .for_each(|a, &x, &v| *a = v * v / x);

        Ok(derivative)
    }
}
