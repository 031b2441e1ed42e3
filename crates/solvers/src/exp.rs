//! Exponential map by numerical integration of the geodesic equation.
//!
//! Given a base point `p` and a tangent vector `v`, the exponential map
//! follows the geodesic with `x(0) = p` and `x'(0) = v` for unit time. The
//! tangent vector's magnitude encodes the distance travelled, so the horizon
//! is always `[0, 1]`.
//!
//! # Algorithm
//!
//! 1. Broadcast `p` to the shape of `v`.
//! 2. Stack the initial state `[p, v]`.
//! 3. Adapt the metric's geodesic equation to the integrator's [`Layout`]:
//!    raveled integrators get a field that restacks the flat state before
//!    calling the metric and flattens the result; time-first integrators get
//!    the arguments swapped.
//! 4. Integrate over `[0, 1]` and return the position half of the last state.
//!
//! The result is not checked against the manifold; that is the metric's job.

mod error;

pub use error::Error;

use ndarray::ArrayD;
use tangent_core::{
    Convention, ExpSolver, FieldResult, Force, Integrator, Layout, Metric, StateLayout, state,
};

use crate::integrate::FixedStep;

/// Computes the exponential map with any [`Integrator`].
#[derive(Debug, Default)]
pub struct ExpOdeSolver<I = FixedStep> {
    integrator: I,
}

impl<I: Integrator> ExpOdeSolver<I> {
    /// Creates an exponential-map solver driving `integrator`.
    pub fn new(integrator: I) -> Self {
        Self { integrator }
    }

    /// Returns the wrapped integrator.
    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Consumes the solver, returning the wrapped integrator.
    pub fn into_integrator(self) -> I {
        self.integrator
    }
}

impl<I: Integrator> ExpSolver for ExpOdeSolver<I> {
    type Error = Error;

    fn solve<M: Metric>(
        &mut self,
        metric: &M,
        tangent_vec: &ArrayD<f64>,
        base_point: &ArrayD<f64>,
    ) -> Result<ArrayD<f64>, Self::Error> {
        let point_shape = tangent_vec.shape();
        let dim = metric.dim();
        if dim == 0 || tangent_vec.len() % dim != 0 {
            return Err(Error::DimensionMismatch {
                dim,
                len: tangent_vec.len(),
            });
        }

        let base_point = base_point
            .broadcast(tangent_vec.raw_dim())
            .ok_or_else(|| Error::Broadcast {
                from: base_point.shape().to_vec(),
                to: point_shape.to_vec(),
            })?;
        let initial_state = state::stack(base_point, tangent_vec.view())?;

        let layout = self.integrator.layout();
        let force = geodesic_force(metric, layout, point_shape);

        let solution = self
            .integrator
            .integrate(force, &initial_state, 1.0)
            .map_err(Error::integrator)?;
        let end = solution.final_state().ok_or(Error::EmptyTrajectory)?;

        let position = match layout.state {
            StateLayout::Raveled => state::raveled_position(end, point_shape)?,
            StateLayout::Structured => state::position(&end)?.to_owned(),
        };
        Ok(position)
    }
}

/// Wraps a metric's geodesic equation in the form `layout` expects.
fn geodesic_force<'a, M: Metric>(
    metric: &'a M,
    layout: Layout,
    point_shape: &'a [usize],
) -> Force<'a> {
    let evaluate = move |state: &ArrayD<f64>, time: f64| -> FieldResult {
        match layout.state {
            StateLayout::Structured => Ok(metric.geodesic_equation(state, time)?),
            StateLayout::Raveled => {
                let structured = state::unravel(state.view(), point_shape)?;
                let derivative = metric.geodesic_equation(&structured, time)?;
                Ok(state::ravel(&derivative).into_dyn())
            }
        }
    };

    match layout.convention {
        Convention::StateFirst => Force::state_first(evaluate),
        Convention::TimeFirst => Force::time_first(move |time, state| evaluate(state, time)),
    }
}
