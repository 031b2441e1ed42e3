use std::fmt;

use ndarray::ArrayD;

/// Error returned by a vector field evaluated outside its domain.
pub type FieldError = Box<dyn std::error::Error + Send + Sync>;

/// Result of a single vector-field evaluation.
pub type FieldResult = Result<ArrayD<f64>, FieldError>;

/// Argument order a numerical core expects from its vector field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum Convention {
    /// `f(state, time)`.
    StateFirst,

    /// `f(time, state)`.
    TimeFirst,
}

/// A vector field ("force") mapping a state and a time to the state's derivative.
///
/// The derivative must have the same shape as the state. Integrators call
/// [`Force::eval`], which forwards the arguments in the order the wrapped
/// closure was written for, so either convention can be handed to any
/// integrator.
pub enum Force<'a> {
    StateFirst(Box<dyn FnMut(&ArrayD<f64>, f64) -> FieldResult + 'a>),
    TimeFirst(Box<dyn FnMut(f64, &ArrayD<f64>) -> FieldResult + 'a>),
}

impl<'a> Force<'a> {
    /// Wraps a closure called as `f(state, time)`.
    pub fn state_first<F>(f: F) -> Self
    where
        F: FnMut(&ArrayD<f64>, f64) -> FieldResult + 'a,
    {
        Self::StateFirst(Box::new(f))
    }

    /// Wraps a closure called as `f(time, state)`.
    pub fn time_first<F>(f: F) -> Self
    where
        F: FnMut(f64, &ArrayD<f64>) -> FieldResult + 'a,
    {
        Self::TimeFirst(Box::new(f))
    }

    /// Returns the calling convention of the wrapped closure.
    #[must_use]
    pub fn convention(&self) -> Convention {
        match self {
            Self::StateFirst(_) => Convention::StateFirst,
            Self::TimeFirst(_) => Convention::TimeFirst,
        }
    }

    /// Evaluates the derivative of `state` at `time`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped closure reports.
    pub fn eval(&mut self, state: &ArrayD<f64>, time: f64) -> FieldResult {
        match self {
            Self::StateFirst(f) => f(state, time),
            Self::TimeFirst(f) => f(time, state),
        }
    }
}

impl fmt::Debug for Force<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Force").field(&self.convention()).finish()
    }
}
