//! Fixed-step integrator driven by a registered or custom step rule.
//!
//! The integrator splits `[0, end_time]` into `n_steps` equal steps and
//! applies the configured [`Stepper`] once per step:
//!
//! ```text
//! dt = end_time / n_steps
//! state_{i+1} = step(force, state_i, i * dt, dt)
//! ```
//!
//! The vector field is called as `f(state, time)` on the structured state
//! it was given; no raveling happens here.
//!
//! # Example
//!
//! ```ignore
//! use tangent_solvers::integrate::fixed_step::{FixedStep, StepRule};
//!
//! let mut integrator = FixedStep::new(100, StepRule::Rk4)?;
//! let solution = integrator.integrate(force, &initial_state, 1.0)?;
//! ```

mod action;
mod error;
mod event;
mod stepper;


pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use stepper::{StepFn, StepRule, Stepper};

use ndarray::{Array1, ArrayD};
use tangent_core::{
    Convention, Force, Integrator, Layout, Observer, Solution, StateError, StateLayout, Status,
};

use crate::integrate::ConfigError;

/// Integrates over a uniform time grid with a fixed number of steps.
#[derive(Debug)]
pub struct FixedStep {
    n_steps: usize,
    stepper: Stepper,
    save_result: bool,
    last_solution: Option<Solution>,
}

impl Default for FixedStep {
    /// Ten forward Euler steps, without keeping results.
    fn default() -> Self {
        Self {
            n_steps: 10,
            stepper: Stepper::default(),
            save_result: false,
            last_solution: None,
        }
    }
}

impl FixedStep {
    /// Creates an integrator taking `n_steps` steps with `stepper`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSteps`] if `n_steps` is zero.
    pub fn new(n_steps: usize, stepper: impl Into<Stepper>) -> Result<Self, ConfigError> {
        if n_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }

        Ok(Self {
            n_steps,
            stepper: stepper.into(),
            save_result: false,
            last_solution: None,
        })
    }

    /// Creates an integrator using the registered rule called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownStepper`] if `name` is not registered, or
    /// [`ConfigError::ZeroSteps`] if `n_steps` is zero.
    pub fn named(n_steps: usize, name: &str) -> Result<Self, ConfigError> {
        let rule: StepRule = name.parse()?;
        Self::new(n_steps, rule)
    }

    /// Keeps the solution of each call, replacing the previous one.
    #[must_use]
    pub fn with_save_result(mut self, save_result: bool) -> Self {
        self.save_result = save_result;
        self
    }

    /// Returns the number of steps per integration.
    #[must_use]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the configured step rule.
    #[must_use]
    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    /// Returns `true` if solutions are kept after each call.
    #[must_use]
    pub fn saves_result(&self) -> bool {
        self.save_result
    }

    /// Integrates `force` over `[0, end_time]`, reporting each step to `observer`.
    ///
    /// # Algorithm
    ///
    /// 1. Emit the initial state as step 0.
    /// 2. For each step `i` in `0..n_steps`:
    ///    - Advance the state with the stepper, starting at time `i * dt`.
    ///    - Record the new state.
    ///    - Emit an [`Event`]; stop if the observer returns [`Action::StopEarly`].
    /// 3. Return the trajectory with its time grid and evaluation count.
    ///
    /// The evaluation count is `steps taken * evaluations per step`, or zero for
    /// a custom stepper.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_time` is not finite, if the vector field fails,
    /// or if a step changes the shape of the state.
    pub fn integrate_observed<Obs>(
        &mut self,
        mut force: Force<'_>,
        initial_state: &ArrayD<f64>,
        end_time: f64,
        mut observer: Obs,
    ) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        if !end_time.is_finite() {
            return Err(Error::EndTime(end_time));
        }

        let times = time_grid(end_time, self.n_steps);
        let dt = end_time / self.n_steps as f64;

        let mut states = Vec::with_capacity(self.n_steps + 1);
        states.push(initial_state.clone());

        let event = Event {
            step: 0,
            time: 0.0,
            state: initial_state.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return self.finish(times, &states, Status::StoppedByObserver);
        }

        for i in 0..self.n_steps {
            let current = &states[i];
            let next = self
                .stepper
                .step(&mut force, current, i as f64 * dt, dt)
                .map_err(Error::Field)?;

            if next.shape() != initial_state.shape() {
                return Err(StateError::ShapeMismatch {
                    expected: initial_state.shape().to_vec(),
                    got: next.shape().to_vec(),
                }
                .into());
            }

            let event = Event {
                step: i + 1,
                time: times[i + 1],
                state: next.clone(),
            };
            states.push(next);

            if let Some(Action::StopEarly) = observer.observe(&event) {
                return self.finish(times, &states, Status::StoppedByObserver);
            }
        }

        self.finish(times, &states, Status::Complete)
    }

    /// Builds the solution for the states reached so far and caches it if requested.
    fn finish(
        &mut self,
        times: Array1<f64>,
        states: &[ArrayD<f64>],
        status: Status,
    ) -> Result<Solution, Error> {
        let steps_taken = states.len() - 1;
        let evaluations = self.stepper.evaluations_per_step().unwrap_or(0) * steps_taken;
        let times = times.slice_move(ndarray::s![..states.len()]);

        let solution = Solution::from_trajectory(times, states, evaluations, status)?;

        if self.save_result {
            self.last_solution = Some(solution.clone());
        }

        Ok(solution)
    }
}

impl Integrator for FixedStep {
    type Error = Error;

    fn layout(&self) -> Layout {
        Layout {
            state: StateLayout::Structured,
            convention: Convention::StateFirst,
        }
    }

    fn integrate(
        &mut self,
        force: Force<'_>,
        initial_state: &ArrayD<f64>,
        end_time: f64,
    ) -> Result<Solution, Self::Error> {
        self.integrate_observed(force, initial_state, end_time, ())
    }

    fn last_solution(&self) -> Option<&Solution> {
        self.last_solution.as_ref()
    }
}

/// Returns `n_steps + 1` uniformly spaced times with the end point pinned exactly.
fn time_grid(end_time: f64, n_steps: usize) -> Array1<f64> {
    let dt = end_time / n_steps as f64;
    (0..=n_steps)
        .map(|i| if i == n_steps { end_time } else { i as f64 * dt })
        .collect()
}
