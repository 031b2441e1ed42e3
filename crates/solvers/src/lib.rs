//! Integrators and exponential-map solvers for Riemannian geodesics.
//!
//! - [`integrate`]: fixed-step and adaptive initial-value integrators
//! - [`exp`]: the exponential map, by integrating the geodesic equation
//! - [`log`]: the logarithm map, by shooting on the exponential map
//!
//! The traits these types implement live in `tangent-core`.

pub mod exp;
pub mod integrate;
pub mod log;

#[cfg(test)]
mod test_metrics;

pub use exp::ExpOdeSolver;
pub use integrate::{Adaptive, FixedStep};
pub use log::LogShootingSolver;
