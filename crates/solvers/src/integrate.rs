//! Initial-value integrators.
//!
//! Both integrators implement [`tangent_core::Integrator`] and integrate over
//! `[0, end_time]`, but expect different inputs:
//!
//! | Integrator | State layout | Convention |
//! |------------|--------------|------------|
//! | [`FixedStep`] | structured | `f(state, time)` |
//! | [`Adaptive`] | raveled | `f(time, state)` |
//!
//! Callers query [`tangent_core::Integrator::layout`] and adapt their vector
//! field accordingly.

mod config;

pub mod adaptive;
pub mod fixed_step;

pub use adaptive::{Adaptive, Method, Options};
pub use config::ConfigError;
pub use fixed_step::{FixedStep, StepRule, Stepper};
