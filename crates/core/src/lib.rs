//! Core traits and types for integrating geodesic equations.
//!
//! This crate defines the shared abstractions that integrators and
//! exponential-map solvers build on:
//!
//! - [`Force`]: a vector field in either calling convention
//! - [`Integrator`]: integrates a [`Force`] and reports a [`Solution`]
//! - [`Layout`]: the state layout and calling convention an integrator expects
//! - [`Metric`]: the geodesic equation of a Riemannian metric
//! - [`ExpSolver`], [`LogSolver`]: exponential and logarithm map solvers
//! - [`Observer`]: receives integrator events and optionally returns actions
//!
//! The [`state`] module converts between structured and raveled states.

mod force;
mod integrator;
mod metric;
mod observer;
mod solution;
mod solver;

pub mod state;

pub use force::{Convention, FieldError, FieldResult, Force};
pub use integrator::{Integrator, Layout, StateLayout};
pub use metric::Metric;
pub use observer::Observer;
pub use solution::{Solution, Status};
pub use solver::{ExpSolver, LogSolver};
pub use state::StateError;
