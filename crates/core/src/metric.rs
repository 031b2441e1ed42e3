use ndarray::ArrayD;

/// A Riemannian metric, seen only through its geodesic equation.
///
/// The geodesic equation is written as a first-order system on the structured
/// state `[position, velocity]` (see [`crate::state`]). Given that state it
/// returns `[velocity, acceleration]`, with the same shape as the input.
/// Points may be vectors or matrices; batched states, shape
/// `(2, batch, ...point)`, must be handled elementwise.
pub trait Metric {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the number of components of one point, e.g. 4 for 2x2 matrices.
    fn dim(&self) -> usize;

    /// Returns the time derivative of a structured state.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state lies outside the metric's domain.
    fn geodesic_equation(&self, state: &ArrayD<f64>, time: f64)
    -> Result<ArrayD<f64>, Self::Error>;
}

impl<M: Metric + ?Sized> Metric for &M {
    type Error = M::Error;

    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn geodesic_equation(
        &self,
        state: &ArrayD<f64>,
        time: f64,
    ) -> Result<ArrayD<f64>, Self::Error> {
        (**self).geodesic_equation(state, time)
    }
}
