use std::{fmt, str::FromStr};

use ndarray::ArrayD;
use tangent_core::{FieldError, FieldResult, Force, StateError};

use crate::integrate::ConfigError;

/// A registered single-step update rule.
///
/// Each rule advances a state by one step `dt` starting at `time`, evaluating
/// the vector field [`StepRule::evaluations_per_step`] times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "lowercase"))]
pub enum StepRule {
    /// Forward Euler: `y + dt * f(y, t)`.
    #[default]
    Euler,

    /// Explicit midpoint, a second-order Runge–Kutta rule.
    Rk2,

    /// Classic fourth-order Runge–Kutta.
    Rk4,
}

impl StepRule {
    /// Every registered rule.
    pub const ALL: [Self; 3] = [Self::Euler, Self::Rk2, Self::Rk4];

    /// Returns the registry name of this rule.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Euler => "euler",
            Self::Rk2 => "rk2",
            Self::Rk4 => "rk4",
        }
    }

    /// Returns the number of vector-field evaluations per step.
    #[must_use]
    pub fn evaluations_per_step(self) -> usize {
        match self {
            Self::Euler => 1,
            Self::Rk2 => 2,
            Self::Rk4 => 4,
        }
    }

    /// Advances `state` by one step of size `dt` starting at `time`.
    ///
    /// # Errors
    ///
    /// Returns the vector field's error, or a [`StateError::ShapeMismatch`]
    /// if the field returns a derivative shaped differently from the state.
    pub fn step(
        self,
        force: &mut Force<'_>,
        state: &ArrayD<f64>,
        time: f64,
        dt: f64,
    ) -> FieldResult {
        match self {
            Self::Euler => {
                let k1 = force.eval(state, time)?;
                advance(state, &k1, dt)
            }
            Self::Rk2 => {
                let half = 0.5 * dt;
                let k1 = force.eval(state, time)?;
                let k2 = force.eval(&advance(state, &k1, half)?, time + half)?;
                advance(state, &k2, dt)
            }
            Self::Rk4 => {
                let half = 0.5 * dt;
                let k1 = force.eval(state, time)?;
                let k2 = force.eval(&advance(state, &k1, half)?, time + half)?;
                let k3 = force.eval(&advance(state, &k2, half)?, time + half)?;
                let k4 = force.eval(&advance(state, &k3, dt)?, time + dt)?;

                let mut next = advance(state, &k1, dt / 6.0)?;
                next.scaled_add(dt / 3.0, &k2);
                next.scaled_add(dt / 3.0, &k3);
                next.scaled_add(dt / 6.0, &k4);
                Ok(next)
            }
        }
    }
}

/// Returns `state + h * slope`, requiring matching shapes.
fn advance(state: &ArrayD<f64>, slope: &ArrayD<f64>, h: f64) -> FieldResult {
    if slope.shape() != state.shape() {
        let err = StateError::ShapeMismatch {
            expected: state.shape().to_vec(),
            got: slope.shape().to_vec(),
        };
        return Err(FieldError::from(err));
    }

    let mut next = state.clone();
    next.scaled_add(h, slope);
    Ok(next)
}

impl FromStr for StepRule {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == name)
            .ok_or_else(|| ConfigError::UnknownStepper(name.to_owned()))
    }
}

impl fmt::Display for StepRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A caller-supplied step function: `(force, state, time, dt) -> next state`.
pub type StepFn = dyn Fn(&mut Force<'_>, &ArrayD<f64>, f64, f64) -> FieldResult;

/// The update rule a fixed-step integrator applies.
pub enum Stepper {
    /// A rule from the registry, with a known cost.
    Named(StepRule),

    /// An opaque step function whose cost cannot be inferred.
    Custom(Box<StepFn>),
}

impl Stepper {
    /// Wraps a custom step function.
    pub fn custom<F>(step: F) -> Self
    where
        F: Fn(&mut Force<'_>, &ArrayD<f64>, f64, f64) -> FieldResult + 'static,
    {
        Self::Custom(Box::new(step))
    }

    /// Returns the registry name, or `None` for a custom step function.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Named(rule) => Some(rule.name()),
            Self::Custom(_) => None,
        }
    }

    /// Returns the vector-field evaluations per step, if known.
    #[must_use]
    pub fn evaluations_per_step(&self) -> Option<usize> {
        match self {
            Self::Named(rule) => Some(rule.evaluations_per_step()),
            Self::Custom(_) => None,
        }
    }

    /// Advances `state` by one step.
    ///
    /// # Errors
    ///
    /// Returns any error raised while evaluating the vector field.
    pub fn step(
        &self,
        force: &mut Force<'_>,
        state: &ArrayD<f64>,
        time: f64,
        dt: f64,
    ) -> FieldResult {
        match self {
            Self::Named(rule) => rule.step(force, state, time, dt),
            Self::Custom(step) => step(force, state, time, dt),
        }
    }
}

impl Default for Stepper {
    fn default() -> Self {
        Self::Named(StepRule::default())
    }
}

impl From<StepRule> for Stepper {
    fn from(rule: StepRule) -> Self {
        Self::Named(rule)
    }
}

impl FromStr for Stepper {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        name.parse().map(Self::Named)
    }
}

impl fmt::Debug for Stepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(rule) => f.debug_tuple("Named").field(rule).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
