//! Logarithm map by shooting on the exponential map.
//!
//! # Algorithm
//!
//! Starting from the chordal guess `v = q - p`, the solver repeatedly
//! computes `exp_p(v)` and corrects the tangent vector by the endpoint miss:
//!
//! ```text
//! v <- v + (q - exp_p(v))
//! ```
//!
//! Iteration stops once the largest component of the miss is within the
//! configured tolerance. The correction is exact for flat metrics, so
//! Euclidean inputs converge after a single exponential map.
//!
//! # Limitations
//!
//! - Convergence is linear and only local; points far from the base point on
//!   strongly curved metrics may not converge.
//! - The result inverts the *numerical* exponential map, so its accuracy is
//!   bounded by the wrapped [`ExpSolver`].

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use ndarray::ArrayD;
use tangent_core::{ExpSolver, LogSolver, Metric};

use crate::exp::ExpOdeSolver;

/// Computes the logarithm map by shooting with an [`ExpSolver`].
#[derive(Debug, Default)]
pub struct LogShootingSolver<E = ExpOdeSolver> {
    exp: E,
    config: Config,
}

impl<E: ExpSolver> LogShootingSolver<E> {
    /// Creates a logarithm solver shooting with `exp`.
    pub fn new(exp: E, config: Config) -> Self {
        Self { exp, config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the wrapped exponential-map solver.
    pub fn exp_solver(&self) -> &E {
        &self.exp
    }
}

impl<E: ExpSolver> LogSolver for LogShootingSolver<E> {
    type Error = Error;

    fn solve<M: Metric>(
        &mut self,
        metric: &M,
        point: &ArrayD<f64>,
        base_point: &ArrayD<f64>,
    ) -> Result<ArrayD<f64>, Self::Error> {
        let base_point = base_point
            .broadcast(point.raw_dim())
            .ok_or_else(|| Error::Broadcast {
                from: base_point.shape().to_vec(),
                to: point.shape().to_vec(),
            })?
            .to_owned();

        let mut tangent_vec = point - &base_point;
        let mut residual = f64::INFINITY;

        for iter in 0..self.config.max_iters() {
            let end = self
                .exp
                .solve(metric, &tangent_vec, &base_point)
                .map_err(Error::exp)?;
            let miss = point - &end;

            if miss.iter().any(|m| !m.is_finite()) {
                return Err(Error::Diverged { iter });
            }
            residual = miss.iter().fold(0.0, |max, m| m.abs().max(max));
            if residual <= self.config.tol() {
                return Ok(tangent_vec);
            }

            tangent_vec += &miss;
        }

        Err(Error::NotConverged {
            iters: self.config.max_iters(),
            residual,
        })
    }
}
