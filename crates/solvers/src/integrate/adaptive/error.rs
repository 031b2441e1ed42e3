use ode_solvers::dop_shared::IntegrationError;
use tangent_core::{FieldError, StateError};

/// Errors that can occur during adaptive integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vector field error: {0}")]
    Field(#[source] FieldError),

    /// The external solver gave up, e.g. after too many steps or when the
    /// step size fell below its limit.
    #[error(transparent)]
    Solver(#[from] IntegrationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("end time must be finite, got {0}")]
    EndTime(f64),
}
