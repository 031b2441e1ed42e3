use std::error::Error as StdError;

use tangent_core::StateError;

/// Errors that can occur while computing the exponential map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("integrator error: {0}")]
    Integrator(#[source] Box<dyn StdError + Send + Sync>),

    /// The tangent vector's components do not split into whole points.
    #[error("{len} components do not split into points of dimension {dim}")]
    DimensionMismatch { dim: usize, len: usize },

    #[error("cannot broadcast base point of shape {from:?} to {to:?}")]
    Broadcast { from: Vec<usize>, to: Vec<usize> },

    #[error(transparent)]
    State(#[from] StateError),

    #[error("integrator returned an empty trajectory")]
    EmptyTrajectory,
}

impl Error {
    pub(crate) fn integrator<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Integrator(Box::new(err))
    }
}
