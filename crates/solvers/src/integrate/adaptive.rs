//! Adaptive step-size integration through the `ode_solvers` crate.
//!
//! The external solver only works on flat vectors and calls its system as
//! `f(t, y)`, so this integrator reports a raveled, time-first [`Layout`].
//! Any initial state is flattened before integration; the returned
//! [`Solution`] holds one flat state per time point, with time as the
//! outermost axis like every other integrator.
//!
//! Time points are the initial time plus every step the solver accepted.
//! States come back from the solver as `nalgebra` vectors and are always
//! converted into `ndarray` arrays.
//!
//! # Errors
//!
//! Failures of the external solver (more than [`Options::max_steps`] steps,
//! step size too small, stiffness detected) are returned as [`Error::Solver`]
//! without retrying.
//! If the vector field fails, integration stops and its error is returned as
//! [`Error::Field`].

mod error;
mod options;
mod system;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use options::{Method, Options};

use std::cell::RefCell;

use ndarray::{Array1, ArrayD};
use ode_solvers::{DVector, Dop853, Dopri5, dop_shared::OutputType};
use tangent_core::{Convention, Force, Integrator, Layout, Solution, StateLayout, Status, state};

use self::system::{FlatSystem, Record};

const DEFAULT_MAX_STEPS: u32 = 100_000;

/// Steps between stiffness tests.
const STIFFNESS_CHECK: u32 = 1000;

/// Integrates with an adaptive Dormand–Prince method.
#[derive(Debug, Default)]
pub struct Adaptive {
    options: Options,
    save_result: bool,
    last_solution: Option<Solution>,
}

impl Adaptive {
    /// Creates an adaptive integrator with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            save_result: false,
            last_solution: None,
        }
    }

    /// Keeps the solution of each call, replacing the previous one.
    #[must_use]
    pub fn with_save_result(mut self, save_result: bool) -> Self {
        self.save_result = save_result;
        self
    }

    /// Returns the solver options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns `true` if solutions are kept after each call.
    #[must_use]
    pub fn saves_result(&self) -> bool {
        self.save_result
    }

    fn run(
        &self,
        force: Force<'_>,
        initial_state: &ArrayD<f64>,
        end_time: f64,
    ) -> Result<Solution, Error> {
        let y0 = DVector::from_iterator(initial_state.len(), initial_state.iter().copied());

        if end_time == 0.0 {
            return Ok(Solution::from_trajectory(
                Array1::from_elem(1, 0.0),
                &[state::ravel(initial_state).into_dyn()],
                0,
                Status::Complete,
            )?);
        }

        let force = RefCell::new(force);
        let record = RefCell::new(Record {
            times: vec![0.0],
            states: vec![y0.clone()],
            error: None,
        });
        let system = FlatSystem {
            force: &force,
            record: &record,
        };

        let options = &self.options;
        let (rtol, atol) = (options.rtol(), options.atol());
        let h_max = options
            .max_step()
            .map_or(end_time, |h| h.copysign(end_time));
        let h = options
            .initial_step()
            .map_or(0.0, |h| h.copysign(end_time));
        let n_max = options.max_steps().unwrap_or(DEFAULT_MAX_STEPS);

        // Step-size controller constants are the solver's published defaults.
        let outcome = match options.method() {
            Method::Dopri5 => {
                let mut stepper = Dopri5::from_param(
                    system, 0.0, end_time, end_time, y0, rtol, atol, 0.9, 0.04, 0.2, 10.0,
                    h_max, h, n_max, STIFFNESS_CHECK, OutputType::Dense,
                );
                stepper.integrate()
            }
            Method::Dop853 => {
                let mut stepper = Dop853::from_param(
                    system, 0.0, end_time, end_time, y0, rtol, atol, 0.9, 0.0, 0.333, 6.0,
                    h_max, h, n_max, STIFFNESS_CHECK, OutputType::Dense,
                );
                stepper.integrate()
            }
        };

        let Record {
            times,
            states,
            error,
        } = record.into_inner();

        if let Some(err) = error {
            return Err(Error::Field(err));
        }
        let stats = outcome?;

        let states: Vec<ArrayD<f64>> = states
            .iter()
            .map(|y| Array1::from_iter(y.iter().copied()).into_dyn())
            .collect();

        Ok(Solution::from_trajectory(
            Array1::from_vec(times),
            &states,
            stats.num_eval as usize,
            Status::Complete,
        )?)
    }
}

impl Integrator for Adaptive {
    type Error = Error;

    fn layout(&self) -> Layout {
        Layout {
            state: StateLayout::Raveled,
            convention: Convention::TimeFirst,
        }
    }

    fn integrate(
        &mut self,
        force: Force<'_>,
        initial_state: &ArrayD<f64>,
        end_time: f64,
    ) -> Result<Solution, Self::Error> {
        if !end_time.is_finite() {
            return Err(Error::EndTime(end_time));
        }

        let solution = self.run(force, initial_state, end_time)?;

        if self.save_result {
            self.last_solution = Some(solution.clone());
        }

        Ok(solution)
    }

    fn last_solution(&self) -> Option<&Solution> {
        self.last_solution.as_ref()
    }
}
