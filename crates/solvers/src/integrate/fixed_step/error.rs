use tangent_core::{FieldError, StateError};

/// Errors that can occur during fixed-step integration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vector field error: {0}")]
    Field(#[source] FieldError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("end time must be finite, got {0}")]
    EndTime(f64),
}
