use crate::integrate::ConfigError;

/// Configuration for the shooting logarithm solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    max_iters: usize,
    tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 50,
            tol: 1e-8,
        }
    }
}

impl Config {
    /// Creates a new config with a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] if `tol` is negative or
    /// non-finite.
    pub fn new(max_iters: usize, tol: f64) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::InvalidTolerance {
                name: "tol",
                value: tol,
            });
        }

        Ok(Self { max_iters, tol })
    }

    /// Returns the maximum number of shooting iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the largest accepted endpoint miss, in any component.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }
}
