use std::error::Error as StdError;

/// Errors that can occur while shooting for the logarithm map.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("exponential map error: {0}")]
    Exp(#[source] Box<dyn StdError + Send + Sync>),

    #[error("no convergence after {iters} iterations, residual {residual:e}")]
    NotConverged { iters: usize, residual: f64 },

    /// The geodesic endpoint stopped being finite.
    #[error("shooting diverged at iteration {iter}")]
    Diverged { iter: usize },

    #[error("cannot broadcast base point of shape {from:?} to {to:?}")]
    Broadcast { from: Vec<usize>, to: Vec<usize> },
}

impl Error {
    pub(crate) fn exp<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Exp(Box::new(err))
    }
}
