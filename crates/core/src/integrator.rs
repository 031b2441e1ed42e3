use ndarray::ArrayD;

use crate::{Convention, Force, Solution};

/// How an integrator's numerical core stores the state it advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub enum StateLayout {
    /// Stacked `[position, velocity]`, shape `(2, ...point_shape)`.
    Structured,

    /// A single flat vector.
    Raveled,
}

/// The state layout and calling convention an integrator expects.
///
/// A layout is a property of the integrator type and never changes between
/// calls to [`Integrator::integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub state: StateLayout,
    pub convention: Convention,
}

impl Layout {
    /// Returns `true` if the numerical core works on flat vectors.
    #[must_use]
    pub fn is_raveled(self) -> bool {
        self.state == StateLayout::Raveled
    }

    /// Returns `true` if the vector field is called as `f(time, state)`.
    #[must_use]
    pub fn is_time_first(self) -> bool {
        self.convention == Convention::TimeFirst
    }
}

/// Integrates a vector field forward from time 0.
///
/// Integrators take `&mut self` because they may keep the most recent
/// [`Solution`]. Only the latest call is kept; each call overwrites it.
pub trait Integrator {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the layout this integrator expects.
    fn layout(&self) -> Layout;

    /// Integrates `force` from `initial_state` over `[0, end_time]`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the vector field fails or the numerical core
    /// cannot complete the integration.
    fn integrate(
        &mut self,
        force: Force<'_>,
        initial_state: &ArrayD<f64>,
        end_time: f64,
    ) -> Result<Solution, Self::Error>;

    /// Returns the solution of the last call, if results are being kept.
    fn last_solution(&self) -> Option<&Solution>;
}
