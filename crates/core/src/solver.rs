use ndarray::ArrayD;

use crate::Metric;

/// Computes the Riemannian exponential map.
pub trait ExpSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the end point of the geodesic leaving `base_point` with initial
    /// velocity `tangent_vec`, followed for unit time.
    ///
    /// `base_point` is broadcast to the shape of `tangent_vec`, so one base
    /// point may be paired with a batch of tangent vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the shapes are incompatible or the geodesic
    /// cannot be computed.
    fn solve<M: Metric>(
        &mut self,
        metric: &M,
        tangent_vec: &ArrayD<f64>,
        base_point: &ArrayD<f64>,
    ) -> Result<ArrayD<f64>, Self::Error>;
}

/// Computes the Riemannian logarithm map, the inverse of [`ExpSolver`].
pub trait LogSolver {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the tangent vector at `base_point` whose geodesic reaches `point`
    /// at unit time.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no such tangent vector is found.
    fn solve<M: Metric>(
        &mut self,
        metric: &M,
        point: &ArrayD<f64>,
        base_point: &ArrayD<f64>,
    ) -> Result<ArrayD<f64>, Self::Error>;
}
